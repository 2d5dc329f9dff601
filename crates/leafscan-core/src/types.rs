//! Core data types: the file the user picked and what the server said about it.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{LeafscanResult, UploadFailed};

/// Fallback when neither the content nor the extension identifies the file.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// The image the user dropped or browsed to.
///
/// Bytes are reference counted, so cloning a file into an upload task is
/// cheap and never copies the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime: String,
    bytes: Bytes,
}

impl SelectedFile {
    /// Build a file with an explicit MIME type.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Build a file and resolve its MIME type from the content signature,
    /// falling back to the file extension.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let mime = sniff_mime(&name, &bytes);
        Self { name, mime, bytes }
    }

    /// Read a file from disk.
    pub async fn read(path: impl AsRef<Path>) -> LeafscanResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_bytes(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Resolve a MIME type the way a browser file input would: magic bytes
/// first, then the extension.
pub fn sniff_mime(name: &str, bytes: &[u8]) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }
    match image::ImageFormat::from_path(name) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => OCTET_STREAM.to_string(),
    }
}

/// Label and accuracy returned by `POST /classify`.
///
/// The wire field for the label is `class`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "class")]
    pub label: String,
    /// Percentage, 0 to 100
    pub accuracy: f64,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, accuracy: f64) -> Self {
        Self {
            label: label.into(),
            accuracy,
        }
    }

    /// Parse and validate a response body.
    pub fn from_json(body: &[u8]) -> Result<Self, UploadFailed> {
        let parsed: Self =
            serde_json::from_slice(body).map_err(|e| UploadFailed::Malformed(e.to_string()))?;
        parsed.validate()
    }

    fn validate(self) -> Result<Self, UploadFailed> {
        if !self.accuracy.is_finite() || !(0.0..=100.0).contains(&self.accuracy) {
            return Err(UploadFailed::Malformed(format!(
                "accuracy {} outside 0..=100",
                self.accuracy
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];

    #[test]
    fn test_mime_from_content_signature() {
        // Content wins over a misleading extension
        let file = SelectedFile::from_bytes("photo.txt", PNG_MAGIC.to_vec());
        assert_eq!(file.mime(), "image/png");

        let file = SelectedFile::from_bytes("leaf", JPEG_MAGIC.to_vec());
        assert_eq!(file.mime(), "image/jpeg");
    }

    #[test]
    fn test_mime_falls_back_to_extension() {
        let file = SelectedFile::from_bytes("leaf.webp", b"not really".to_vec());
        assert_eq!(file.mime(), "image/webp");
    }

    #[test]
    fn test_mime_unknown() {
        let file = SelectedFile::from_bytes("notes.txt", b"hello world".to_vec());
        assert_eq!(file.mime(), OCTET_STREAM);
    }

    #[test]
    fn test_clone_shares_bytes() {
        let file = SelectedFile::from_bytes("a.png", PNG_MAGIC.to_vec());
        let copy = file.clone();
        assert_eq!(file.bytes().as_ptr(), copy.bytes().as_ptr());
        assert_eq!(copy.len(), PNG_MAGIC.len());
    }

    #[tokio::test]
    async fn test_read_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("leaf.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let file = SelectedFile::read(&path).await.unwrap();
        assert_eq!(file.name(), "leaf.png");
        assert_eq!(file.mime(), "image/png");
        assert!(!file.is_empty());
    }

    #[test]
    fn test_result_parses_wire_shape() {
        let result = ClassificationResult::from_json(br#"{"class":"cat","accuracy":97.5}"#).unwrap();
        assert_eq!(result.label, "cat");
        assert_eq!(result.accuracy, 97.5);
    }

    #[test]
    fn test_result_serializes_label_as_class() {
        let json = serde_json::to_string(&ClassificationResult::new("Septoria", 81.0)).unwrap();
        assert!(json.contains("\"class\":\"Septoria\""));
    }

    #[test]
    fn test_result_rejects_missing_fields() {
        let err = ClassificationResult::from_json(br#"{"label":"cat","accuracy":97.5}"#).unwrap_err();
        assert!(matches!(err, UploadFailed::Malformed(_)));

        let err = ClassificationResult::from_json(br#"{"class":"cat"}"#).unwrap_err();
        assert!(matches!(err, UploadFailed::Malformed(_)));
    }

    #[test]
    fn test_result_rejects_non_json() {
        let err = ClassificationResult::from_json(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, UploadFailed::Malformed(_)));
    }

    #[test]
    fn test_accuracy_digits_survive_parsing() {
        let body = br#"{"class":"Healthy","accuracy":90.55903098586965}"#;
        let parsed = ClassificationResult::from_json(body).unwrap();
        assert_eq!(parsed.accuracy, 90.55903098586965);
        assert_eq!(parsed.accuracy.to_string(), "90.55903098586965");
    }

    proptest! {
        #[test]
        fn accuracy_in_range_is_accepted(acc in 0.0f64..=100.0) {
            let body = serde_json::to_vec(&ClassificationResult::new("Healthy", acc)).unwrap();
            let parsed = ClassificationResult::from_json(&body).unwrap();
            prop_assert_eq!(parsed.accuracy, acc);
        }

        #[test]
        fn accuracy_out_of_range_is_rejected(acc in prop_oneof![-1.0e9f64..-0.001, 100.001f64..1.0e9]) {
            let body = format!(r#"{{"class":"Healthy","accuracy":{}}}"#, acc);
            prop_assert!(ClassificationResult::from_json(body.as_bytes()).is_err());
        }
    }
}
