//! Core data types for the Refract enhancement pipeline.

use crate::error::Result;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Prefix that marks an image reference as an inline, base64-embedded payload.
pub const EMBEDDED_IMAGE_PREFIX: &str = "data:image";

/// The kind of work the downstream image model is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Create a new image from text alone
    Generation,
    /// Modify an existing image guided by text
    Editing,
}

impl TaskType {
    /// Classify a request by whether it carries a non-empty image reference.
    pub fn from_image(image: Option<&str>) -> Self {
        match image {
            Some(image) if !image.is_empty() => TaskType::Editing,
            _ => TaskType::Generation,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Generation => f.write_str("Generation"),
            TaskType::Editing => f.write_str("Editing"),
        }
    }
}

/// One call into the enhancement pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementRequest {
    /// User prompt, possibly percent-encoded
    pub prompt: String,

    /// Downstream image model name (case-insensitive)
    pub model: String,

    /// Seed forwarded to the completion service
    pub seed: i64,

    /// Encoded image reference (data URL or remote URL) for editing tasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl EnhancementRequest {
    /// Build a generation request (no image).
    pub fn new(prompt: impl Into<String>, model: impl Into<String>, seed: i64) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            seed,
            image: None,
        }
    }

    /// Attach an image reference, turning this into an editing request.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Task type implied by the image reference.
    pub fn task(&self) -> TaskType {
        TaskType::from_image(self.image.as_deref())
    }
}

/// Returns true if `value` is an inline image payload rather than a reference.
pub fn is_embedded_image(value: &str) -> bool {
    value.starts_with(EMBEDDED_IMAGE_PREFIX)
}

/// Base64-encoded image ready to embed in a completion request.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and a format or extension string.
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        let media_type = match format.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            other => {
                tracing::warn!("Unknown image format '{other}', defaulting to image/jpeg");
                "image/jpeg"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Read an image file, taking the format from its extension.
    ///
    /// Files without an extension are treated as JPEG.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("jpeg");
        Ok(Self::from_bytes(&bytes, format))
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_from_image() {
        assert_eq!(TaskType::from_image(None), TaskType::Generation);
        assert_eq!(TaskType::from_image(Some("")), TaskType::Generation);
        assert_eq!(
            TaskType::from_image(Some("data:image/png;base64,AAAA")),
            TaskType::Editing
        );
    }

    #[test]
    fn test_request_task() {
        let request = EnhancementRequest::new("a cat", "flux", 1);
        assert_eq!(request.task(), TaskType::Generation);
        let request = request.with_image("https://example.com/cat.png");
        assert_eq!(request.task(), TaskType::Editing);
    }

    #[test]
    fn test_is_embedded_image() {
        assert!(is_embedded_image("data:image/gif;base64,R0lGOD"));
        assert!(!is_embedded_image("https://example.com/cat.png"));
        assert!(!is_embedded_image("a cozy bookstore"));
    }

    #[test]
    fn test_image_input_from_bytes_png() {
        let input = ImageInput::from_bytes(&[0x89, 0x50, 0x4E, 0x47], "PNG");
        assert_eq!(input.media_type, "image/png");
        assert!(!input.data.is_empty());
    }

    #[test]
    fn test_image_input_from_path_uses_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let input = ImageInput::from_path(&path).unwrap();
        assert_eq!(input.data_url(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_image_input_from_path_missing_file_is_io_error() {
        let err = ImageInput::from_path(Path::new("/nonexistent/path/ghost.jpg")).unwrap_err();
        assert!(matches!(err, crate::error::RefractError::Io(_)));
    }

    #[test]
    fn test_image_input_data_url_is_embedded() {
        let url = ImageInput::from_bytes(&[1, 2, 3], "jpeg").data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(is_embedded_image(&url));
    }
}
