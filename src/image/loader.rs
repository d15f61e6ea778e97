use crate::models::{ImageInput, INVALID_IMAGE_MESSAGE};
use crate::{Error, Result};
use ::image::{ImageError, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

fn sniff_format(bytes: &[u8], path: Option<&Path>) -> Option<ImageFormat> {
    ::image::guess_format(bytes)
        .ok()
        .or_else(|| path.and_then(|p| ImageFormat::from_path(p).ok()))
}

/// MIME type from magic bytes, falling back to the file extension.
pub fn sniff_mime(bytes: &[u8], path: Option<&Path>) -> Option<&'static str> {
    sniff_format(bytes, path).map(|format| format.to_mime_type())
}

/// Reads an image file into an [`ImageInput`].
///
/// Unreadable or undecodable files are `FileRead` errors; files that are not
/// images at all are `Validation` errors.
pub fn load_image(path: &Path) -> Result<ImageInput> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::FileRead(format!("{}: {}", path.display(), e)))?;

    let format = match sniff_format(&bytes, Some(path)) {
        Some(format) => format,
        None => {
            tracing::warn!(
                "Unrecognized image format for {} (first 4 bytes: {:02X?})",
                path.display(),
                &bytes[..bytes.len().min(4)]
            );
            return Err(Error::Validation(INVALID_IMAGE_MESSAGE.to_string()));
        }
    };

    let mut reader = ImageReader::new(Cursor::new(&bytes));
    reader.set_format(format);
    match reader.into_dimensions() {
        Ok((width, height)) => {
            tracing::debug!(
                "Loaded {} ({}, {}x{}, {} bytes)",
                path.display(),
                format.to_mime_type(),
                width,
                height,
                bytes.len()
            );
        }
        Err(ImageError::Unsupported(e)) => {
            tracing::warn!(
                "Cannot verify {} locally ({}), sending as-is",
                path.display(),
                e
            );
        }
        Err(e) => {
            tracing::warn!("Failed to decode {}: {}", path.display(), e);
            return Err(e.into());
        }
    }

    ImageInput::new(format.to_mime_type(), bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureKind;
    use ::image::DynamicImage;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::new_rgb8(2, 2)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_sniff_png_from_magic_bytes() {
        assert_eq!(sniff_mime(&png_bytes(), None), Some("image/png"));
    }

    #[test]
    fn test_sniff_jpeg_from_magic_bytes() {
        assert_eq!(
            sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10], None),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_sniff_falls_back_to_extension() {
        assert_eq!(
            sniff_mime(&[0x00, 0x01], Some(Path::new("photo.webp"))),
            Some("image/webp")
        );
        assert_eq!(sniff_mime(&[0x00, 0x01], Some(Path::new("notes.txt"))), None);
        assert_eq!(sniff_mime(&[], None), None);
    }

    #[test]
    fn test_load_valid_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problem.png");
        std::fs::write(&path, png_bytes()).unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.bytes(), png_bytes().as_slice());
    }

    #[test]
    fn test_load_missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::FileRead(_)));
        assert_eq!(err.kind(), FailureKind::FileRead);
    }

    #[test]
    fn test_load_corrupt_png_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(b"definitely not a png chunk");
        std::fs::write(&path, bytes).unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
        assert_eq!(err.kind(), FailureKind::FileRead);
        assert!(err.to_string().starts_with("Could not decode image"));
    }

    #[test]
    fn test_load_non_image_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "2+2=?").unwrap();

        let err = load_image(&path).unwrap_err();
        assert_eq!(err.to_string(), INVALID_IMAGE_MESSAGE);
        assert_eq!(err.kind(), FailureKind::Validation);
    }
}
