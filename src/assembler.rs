//! Request assembly
//!
//! Turns a problem's free text and optional image into the ordered content
//! parts of a single `generateContent` request.

use crate::ai::gemini::{Content, GenerateContentRequest, InlineData, Part};
use crate::models::ImageInput;
use crate::{prompts, Error, Result};
use base64::Engine as _;

pub const EMPTY_PROBLEM_MESSAGE: &str =
    "Please provide a problem to solve: enter text or attach an image.";

/// Fails when there is neither non-blank text nor an image.
pub fn validate(text: &str, image: Option<&ImageInput>) -> Result<()> {
    if text.trim().is_empty() && image.is_none() {
        return Err(Error::Validation(EMPTY_PROBLEM_MESSAGE.to_string()));
    }
    Ok(())
}

/// Base64-encodes the whole blob and pairs it with its MIME type.
pub fn encode_image(image: &ImageInput) -> InlineData {
    InlineData {
        mime_type: image.mime_type().to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(image.bytes()),
    }
}

/// Text part first, then the image part when one was supplied.
pub fn build_parts(text: &str, image: Option<&ImageInput>) -> Vec<Part> {
    let problem = if text.trim().is_empty() {
        prompts::IMAGE_ONLY_PROBLEM
    } else {
        text
    };

    let mut parts = vec![Part::Text {
        text: prompts::render(prompts::SOLVER, &[("problem", problem)]),
    }];

    if let Some(image) = image {
        parts.push(Part::InlineData {
            inline_data: encode_image(image),
        });
    }

    parts
}

pub fn build_request(text: &str, image: Option<&ImageInput>) -> Result<GenerateContentRequest> {
    validate(text, image)?;
    Ok(GenerateContentRequest {
        contents: vec![Content::user(build_parts(text, image))],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png() -> ImageInput {
        ImageInput::new("image/png", vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap()
    }

    #[test]
    fn test_validate_requires_text_or_image() {
        assert!(matches!(validate("", None), Err(Error::Validation(_))));
        assert!(matches!(validate(" \n\t", None), Err(Error::Validation(_))));
        assert!(validate("2+2=?", None).is_ok());
        assert!(validate("", Some(&png())).is_ok());
    }

    #[test]
    fn test_text_only_builds_one_part() {
        let parts = build_parts("2+2=?", None);
        assert_eq!(parts.len(), 1);

        let text = parts[0].as_text().unwrap();
        assert!(text.ends_with("Problem: 2+2=?\n"));
        assert!(!text.contains("{{problem}}"));
    }

    #[test]
    fn test_text_and_image_builds_text_then_image() {
        let image = png();
        let parts = build_parts("What shape is this?", Some(&image));
        assert_eq!(parts.len(), 2);
        assert!(parts[0].as_text().unwrap().contains("What shape is this?"));
        assert_eq!(
            parts[1],
            Part::InlineData {
                inline_data: encode_image(&image)
            }
        );
    }

    #[test]
    fn test_image_only_uses_placeholder_text() {
        let parts = build_parts("   ", Some(&png()));
        assert_eq!(parts.len(), 2);
        assert!(parts[0]
            .as_text()
            .unwrap()
            .contains(prompts::IMAGE_ONLY_PROBLEM));
    }

    #[test]
    fn test_encode_image_round_trips() {
        let image = ImageInput::new("image/jpeg", (0u8..=255).collect()).unwrap();
        let inline = encode_image(&image);
        assert_eq!(inline.mime_type, "image/jpeg");

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .unwrap();
        assert_eq!(decoded, image.bytes());
    }

    #[test]
    fn test_encode_empty_blob() {
        let image = ImageInput::new("image/png", vec![]).unwrap();
        assert_eq!(encode_image(&image).data, "");
    }

    #[test]
    fn test_build_request_wraps_single_user_content() {
        let request = build_request("2+2=?", Some(&png())).unwrap();
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
        assert_eq!(request.contents[0].parts.len(), 2);
        assert!(request.validate().is_ok());

        assert!(build_request("", None).is_err());
    }
}
