use crate::shared::config::ApiConfig;
use crate::shared::error::{AppError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// `{ success, data }` 形式のレスポンス。`success` は参照しない
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> ApiEnvelope<T> {
    fn empty(message: Option<String>) -> Self {
        Self {
            success: None,
            data: None,
            message,
            count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    pub fn into_envelope<T: DeserializeOwned>(self) -> Result<ApiEnvelope<T>> {
        match self {
            ResponseBody::Json(value) => serde_json::from_value(value)
                .map_err(|err| AppError::Deserialization(err.to_string())),
            ResponseBody::Text(text) => {
                if text.trim().is_empty() {
                    return Ok(ApiEnvelope::empty(None));
                }
                // content-type を付けずに JSON を返すサーバーもある
                match serde_json::from_str(&text) {
                    Ok(envelope) => Ok(envelope),
                    Err(_) => Ok(ApiEnvelope::empty(Some(text))),
                }
            }
        }
    }
}

pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

/// 固定オリジンに対する薄い HTTP クライアント。リトライはしない
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = config.user_agent.as_deref() {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| AppError::Configuration(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }

    pub async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<ResponseBody> {
        let url = self.url_for(path);
        debug!(%method, %url, "sending request");

        let builder = self.client.request(method.clone(), &url);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let text = response
            .text()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        debug!(%method, %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(AppError::http(status.as_u16(), path, &text));
        }

        if is_json && !text.trim().is_empty() {
            let value = serde_json::from_str(&text)
                .map_err(|err| AppError::Deserialization(err.to_string()))?;
            return Ok(ResponseBody::Json(value));
        }
        Ok(ResponseBody::Text(text))
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<ApiEnvelope<T>> {
        self.send(method, path, body).await?.into_envelope()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiEnvelope<T>> {
        self.request(Method::GET, path, RequestBody::Empty).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, RequestBody::Empty).await?;
        Ok(())
    }
}
