use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use universal_solver::{display, Config, SolveResult, Solver};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Bold emphasis via ANSI escapes
    #[default]
    Ansi,
    /// HTML fragment with <strong> emphasis
    Html,
    /// Emphasis delimiters removed
    Plain,
    /// Model output exactly as received
    Raw,
}

#[derive(Debug, Parser)]
#[command(name = "universal-solver")]
#[command(about = "Solve a problem described by text and/or an image")]
struct CliArgs {
    /// Problem text. May be omitted when an image is attached.
    #[arg(value_name = "TEXT", default_value = "")]
    text: String,

    /// Image of the problem (PNG, JPG, WEBP).
    #[arg(short, long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// How to render the solution.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ansi)]
    format: OutputFormat,

    /// Model ID, overriding SOLVER_MODEL.
    #[arg(long)]
    model: Option<String>,

    /// Request timeout in seconds, overriding SOLVER_TIMEOUT_SECS.
    #[arg(long, value_name = "SECS", value_parser = parse_timeout_arg)]
    timeout: Option<Duration>,
}

fn parse_timeout_arg(input: &str) -> std::result::Result<Duration, String> {
    match input.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(format!(
            "Invalid timeout '{}'. Expected a positive number of seconds",
            input
        )),
    }
}

/// Environment configuration with command-line overrides applied.
fn load_config(args: &CliArgs) -> universal_solver::Result<Config> {
    let mut config = Config::from_env_with_timeout(args.timeout)?;
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    Ok(config)
}

fn render(solution: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Ansi => display::to_ansi(solution),
        OutputFormat::Html => display::to_html(solution),
        OutputFormat::Plain => display::to_plain(solution),
        OutputFormat::Raw => solution.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "universal_solver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let result = match load_config(&args) {
        Ok(config) => {
            let solver = Solver::gemini(config);
            info!("Using model {}", solver.config().model);
            solver
                .solve_with_image_file(&args.text, args.image.as_deref())
                .await
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            SolveResult::from(e)
        }
    };

    match result {
        SolveResult::Success { text } => {
            println!("{}", render(&text, args.format));
            Ok(())
        }
        failure @ SolveResult::Failure { .. } => {
            eprintln!("{}", failure.into_display_string());
            std::process::exit(1);
        }
    }
}
