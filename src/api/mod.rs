use crate::git::RemoteStatus;
use crate::models::{
    CommitRequest, DeleteRequest, FileTreeNode, FilesResponse, InitRequest, RenameRequest,
    RenderRequest, SaveRequest, WikiConfig,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum ApiError {
    /// HTTP 404. Page loads turn this into the create-page prompt.
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Parse(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Successful response body, split on the response content type.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Json(serde_json::Value::String(s)) => s,
            Self::Json(v) => v.to_string(),
        }
    }

    pub fn into_json<T: DeserializeOwned>(self) -> ApiResult<T> {
        match self {
            Self::Json(v) => serde_json::from_value(v).map_err(ApiError::parse),
            Self::Text(s) => serde_json::from_str(&s).map_err(ApiError::parse),
        }
    }
}

/// Pick the user-facing message of a failed response.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        let field = map
            .get("error")
            .or_else(|| map.get("message"))
            .and_then(|v| v.as_str());
        if let Some(msg) = field {
            return msg.to_string();
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Request failed ({status})"))
}

pub(crate) fn classify_response(
    status: u16,
    content_type: Option<&str>,
    body: String,
) -> ApiResult<ResponseBody> {
    if !(200..300).contains(&status) {
        let message = error_message(status, &body);
        return Err(if status == 404 {
            ApiError::NotFound { message }
        } else {
            ApiError::Http { status, message }
        });
    }

    let is_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false);

    if is_json {
        if body.trim().is_empty() {
            return Ok(ResponseBody::Json(serde_json::Value::Null));
        }
        return serde_json::from_str(&body)
            .map(ResponseBody::Json)
            .map_err(ApiError::parse);
    }

    Ok(ResponseBody::Text(body))
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    /// Reads `window.ENV.API_URL` (or `window.ENV.api_url`). Empty means the
    /// API is served from the page's own origin.
    pub fn new() -> Self {
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self { api_url: url_str };
                            }
                        }
                    }
                }
            }
        }

        Self {
            api_url: String::new(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    fn url(&self, path: &str) -> String {
        if !self.base_url.is_empty() {
            return format!("{}{}", self.base_url, path);
        }

        // reqwest needs an absolute URL, even for same-origin calls.
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        format!("{}{}", origin, path)
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<ResponseBody> {
        let client = reqwest::Client::new();
        let mut req = client
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        let status = res.status();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = if status.is_success() {
            res.text().await.map_err(ApiError::network)?
        } else {
            res.text().await.unwrap_or_default()
        };

        classify_response(status.as_u16(), content_type.as_deref(), body)
    }

    async fn get(&self, path: &str) -> ApiResult<ResponseBody> {
        self.request::<()>(Method::GET, path, None).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<ResponseBody> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn post_empty(&self, path: &str) -> ApiResult<ResponseBody> {
        self.request::<()>(Method::POST, path, None).await
    }

    pub async fn init(&self, path: &str) -> ApiResult<String> {
        let body = InitRequest {
            path: path.to_string(),
        };
        Ok(self.post("/api/init", &body).await?.into_text())
    }

    pub async fn get_config(&self) -> ApiResult<WikiConfig> {
        self.get("/api/config").await?.into_json()
    }

    pub async fn set_config(&self, config: &WikiConfig) -> ApiResult<String> {
        Ok(self.post("/api/config", config).await?.into_text())
    }

    pub async fn get_files(&self) -> ApiResult<Vec<FileTreeNode>> {
        let res: FilesResponse = self.get("/api/files").await?.into_json()?;
        Ok(res.files)
    }

    /// Raw Markdown of `filename`. A missing page is `ApiError::NotFound`.
    pub async fn load(&self, filename: &str) -> ApiResult<String> {
        let path = format!("/api/load?filename={}", urlencoding::encode(filename));
        Ok(self.get(&path).await?.into_text())
    }

    pub async fn save(&self, filename: &str, content: &str) -> ApiResult<String> {
        let body = SaveRequest {
            filename: filename.to_string(),
            content: content.to_string(),
        };
        Ok(self.post("/api/save", &body).await?.into_text())
    }

    pub async fn delete(&self, filename: &str) -> ApiResult<String> {
        let body = DeleteRequest {
            filename: filename.to_string(),
        };
        Ok(self
            .request(Method::DELETE, "/api/delete", Some(&body))
            .await?
            .into_text())
    }

    /// Rename or move a page; both take storage names.
    pub async fn rename(&self, old_path: &str, new_path: &str) -> ApiResult<String> {
        let body = RenameRequest {
            old_path: old_path.to_string(),
            new_path: new_path.to_string(),
        };
        Ok(self.post("/api/rename", &body).await?.into_text())
    }

    pub async fn status(&self) -> ApiResult<RemoteStatus> {
        Ok(RemoteStatus::from_body(self.get("/api/status").await?))
    }

    pub async fn fetch(&self) -> ApiResult<String> {
        Ok(self.post_empty("/api/fetch").await?.into_text())
    }

    pub async fn pull(&self) -> ApiResult<String> {
        Ok(self.post_empty("/api/pull").await?.into_text())
    }

    pub async fn push(&self) -> ApiResult<String> {
        Ok(self.post_empty("/api/push").await?.into_text())
    }

    pub async fn commit(&self, message: &str) -> ApiResult<String> {
        let body = CommitRequest {
            message: message.to_string(),
        };
        Ok(self.post("/api/commit", &body).await?.into_text())
    }

    /// Server-side Markdown to HTML.
    pub async fn render(&self, markdown: &str) -> ApiResult<String> {
        let body = RenderRequest {
            markdown: markdown.to_string(),
        };
        Ok(self.post("/api/render", &body).await?.into_text())
    }
}
