use crate::domain::value_objects::FileDescriptor;
use crate::shared::error::{AppError, Result};
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// テキストフィールドとファイルパートからなるフォームを組み立てる
pub struct FormBuilder {
    form: Form,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormBuilder {
    pub fn new() -> Self {
        Self { form: Form::new() }
    }

    pub fn text(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.form = self.form.text(field, value.into());
        self
    }

    pub fn optional_text(self, field: &'static str, value: Option<&str>) -> Self {
        match value.filter(|value| !value.is_empty()) {
            Some(value) => self.text(field, value.to_string()),
            None => self,
        }
    }

    /// uri が空ならファイルは添付しない。リモート URI はローカルから読めないので拒否する
    pub async fn file(mut self, field: &'static str, file: Option<&FileDescriptor>) -> Result<Self> {
        let Some(file) = file.filter(|file| !file.is_empty()) else {
            return Ok(self);
        };
        if file.is_remote() {
            return Err(AppError::invalid_input(format!(
                "{field} must be a local file, got {}",
                file.uri
            )));
        }
        let path = file.local_path();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| AppError::Io(format!("{path}: {err}")))?;
        let file_name = file.file_name();
        let content_type = file.content_type();
        debug!(field, %file_name, %content_type, size = bytes.len(), "attaching file part");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|err| AppError::InvalidInput(format!("invalid content type: {err}")))?;
        self.form = self.form.part(field, part);
        Ok(self)
    }

    pub fn build(self) -> Form {
        self.form
    }
}
