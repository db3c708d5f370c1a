//! # 图床上传模块（ImageUploader）
//!
//! ## 设计思路
//!
//! 画布导出的 Data URL 需要上传到图床，换回可公开访问的图片地址用于分享。
//! 整个过程是一次性的：不重试、不退避、不缓存。
//!
//! ## 实现思路
//!
//! - 先校验并拆出 Base64 负载（第一个逗号之后的全部内容），失败时在发请求前返回。
//! - 以 multipart 表单提交 `key` 与 `image` 两个字段。
//! - 请求失败或非 2xx → `Transport`；响应体不是 JSON → `MalformedResponse`。
//! - 响应 JSON 原样返回，只额外提供 `data.url` / `data.url_viewer` 的读取方法。

use base64::{Engine as _, engine::general_purpose};
use reqwest::Url;
use reqwest::multipart::Form;
use serde_json::Value;

use crate::config::UploadSettings;
use crate::error::{SnippetError, TransportError};

/// 从 Data URL 中取出第一个逗号之后的负载。
pub fn extract_base64_payload(data_url: &str) -> Result<&str, SnippetError> {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .ok_or_else(|| SnippetError::MalformedInput("Data URL 缺少逗号分隔的负载".to_string()))
}

/// 将原始字节编码为 `data:<mime>;base64,<payload>`。
pub fn data_url_from_bytes(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

/// 一次上传提交的表单内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub api_key: String,
    pub image_base64: String,
}

impl UploadPayload {
    pub fn from_data_url(api_key: impl Into<String>, data_url: &str) -> Result<Self, SnippetError> {
        let image_base64 = extract_base64_payload(data_url)?.to_string();
        Ok(Self {
            api_key: api_key.into(),
            image_base64,
        })
    }

    pub fn into_form(self) -> Form {
        Form::new()
            .text("key", self.api_key)
            .text("image", self.image_base64)
    }
}

/// 图床响应，JSON 原样保留。
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResult(Value);

impl UploadResult {
    pub fn json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }

    /// 图片直链（`data.url`）。
    pub fn image_url(&self) -> Option<&str> {
        self.0.pointer("/data/url").and_then(Value::as_str)
    }

    /// 图片浏览页（`data.url_viewer`）。
    pub fn viewer_url(&self) -> Option<&str> {
        self.0.pointer("/data/url_viewer").and_then(Value::as_str)
    }
}

/// 图床上传器。
///
/// 内部 `reqwest::Client` 可复用，多次并发调用互不影响。
#[derive(Clone)]
pub struct ImageUploader {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl ImageUploader {
    pub fn new(settings: &UploadSettings) -> Result<Self, SnippetError> {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(client: reqwest::Client, settings: &UploadSettings) -> Result<Self, SnippetError> {
        let endpoint = Url::parse(settings.endpoint.trim())
            .map_err(|e| SnippetError::Config(format!("上传地址格式错误：{}", e)))?;
        Ok(Self {
            client,
            endpoint,
            api_key: settings.api_key.clone(),
        })
    }

    /// 上传 Data URL 图片并返回解析后的响应。
    pub async fn upload(&self, data_url: &str) -> Result<UploadResult, SnippetError> {
        let payload = UploadPayload::from_data_url(self.api_key.as_str(), data_url)?;
        let endpoint_for_log = redact_url_for_log(&self.endpoint);

        log::info!(
            "⬆️ 开始上传图片 - 接口: {} 负载: {} 字节",
            endpoint_for_log,
            payload.image_base64.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(payload.into_form())
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("⚠️ 图床返回异常状态 - 接口: {} 状态: {}", endpoint_for_log, status);
            return Err(TransportError::Status(status).into());
        }

        let body = response.bytes().await.map_err(TransportError::Request)?;
        let json = serde_json::from_slice::<Value>(&body).map_err(SnippetError::MalformedResponse)?;

        log::info!("✅ 图片上传完成 - 响应 {} 字节", body.len());
        Ok(UploadResult(json))
    }
}

/// 去掉查询串与片段，避免在日志中泄露密钥。
fn redact_url_for_log(url: &Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.set_fragment(None);
    redacted.to_string()
}
