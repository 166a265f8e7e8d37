//! Image inputs accepted by the scoring client.

use std::path::{Path, PathBuf};

/// File name sent for uploads that did not come from a path.
pub const DEFAULT_FILE_NAME: &str = "image.jpg";

/// Content type used when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// An image to be scored: raw bytes or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes (JPEG, PNG, ...). No format validation is done.
    Bytes(Vec<u8>),
    /// Path to an image file on the local filesystem.
    Path(PathBuf),
}

impl ImageSource {
    /// File name to report in the upload.
    pub fn file_name(&self) -> String {
        match self {
            ImageSource::Bytes(_) => DEFAULT_FILE_NAME.to_string(),
            ImageSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
        }
    }

    /// Content type guessed from the file extension.
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageSource::Bytes(_) => DEFAULT_CONTENT_TYPE,
            ImageSource::Path(path) => content_type_for_path(path),
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

impl From<&[u8]> for ImageSource {
    fn from(bytes: &[u8]) -> Self {
        ImageSource::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

/// Map an image file extension to its MIME type.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_defaults() {
        let source = ImageSource::from(vec![0xff, 0xd8]);
        assert_eq!(source.file_name(), "image.jpg");
        assert_eq!(source.content_type(), "image/jpeg");
    }

    #[test]
    fn test_path_file_name() {
        let source = ImageSource::from(Path::new("tests/u1-face-cropped.jpg"));
        assert_eq!(source.file_name(), "u1-face-cropped.jpg");
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type_for_path(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for_path(Path::new("a.webp")), "image/webp");
        assert_eq!(content_type_for_path(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("no_extension")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("a.tiff")), "image/jpeg");
    }
}
