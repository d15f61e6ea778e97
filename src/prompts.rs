pub const SOLVER: &str = include_str!("../data/prompts/solver.txt");

/// Stands in for the problem text when only an image was submitted.
pub const IMAGE_ONLY_PROBLEM: &str = "See attached image.";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
