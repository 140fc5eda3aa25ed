use serde::{Deserialize, Serialize};

const FILE_URI_PREFIX: &str = "file://";
pub const DEFAULT_UPLOAD_NAME: &str = "upload.jpg";
pub const DEFAULT_UPLOAD_MIME: &str = "image/jpeg";

/// アップロード対象のファイル参照
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileDescriptor {
    pub uri: String,
    pub name: Option<String>,
    pub mime_type: Option<String>,
}

impl FileDescriptor {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: None,
            mime_type: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.uri.trim().is_empty()
    }

    pub fn is_remote(&self) -> bool {
        self.uri.starts_with("http")
    }

    /// `file://` を取り除いたローカルパス
    pub fn local_path(&self) -> &str {
        self.uri
            .strip_prefix(FILE_URI_PREFIX)
            .unwrap_or(self.uri.as_str())
    }

    pub fn file_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
            return name.to_string();
        }
        self.local_path()
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_NAME)
            .to_string()
    }

    pub fn content_type(&self) -> String {
        if let Some(mime_type) = self.mime_type.as_deref().filter(|mime| !mime.is_empty()) {
            return mime_type.to_string();
        }
        mime_guess::from_path(self.file_name())
            .first_raw()
            .unwrap_or(DEFAULT_UPLOAD_MIME)
            .to_string()
    }
}
