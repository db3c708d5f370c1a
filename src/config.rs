//! # 配置模块
//!
//! ## 设计思路
//!
//! 动画资源路径、上传接口与各类密钥统一收敛到 `SnippetConfig`，
//! 不再在各个片段中重复硬编码。
//!
//! ## 实现思路
//!
//! - 所有字段带 `#[serde(default)]`，配置文件只需写需要覆盖的部分。
//! - `load` 读取 JSON 文件，文件不存在时回退默认值。
//! - `validate` 在启动时尽早拒绝明显错误的上传地址。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationConfig, AspectMode, Renderer};
use crate::error::SnippetError;

pub const DEFAULT_MOUNT_POINT_ID: &str = "lottie-snow-effect";
pub const DEFAULT_ANIMATION_PATH: &str = "/lottie/snow-effect.json";
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://api.imgbb.com/1/upload";
pub const DEFAULT_SITE_URL: &str = "https://drawtree.netlify.app";
pub const DEFAULT_SHARE_TITLE: &str = "🎄트리 그리기 챌린지🎄";

/// 顶层配置。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    pub animation: AnimationSettings,
    pub share: ShareSettings,
    pub upload: UploadSettings,
}

/// 动画加载默认参数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub mount_point_id: String,
    /// 站内相对路径或绝对 URL。
    pub source_path: String,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub autoplay: bool,
    pub aspect_mode: AspectMode,
    pub renderer: Renderer,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            mount_point_id: DEFAULT_MOUNT_POINT_ID.to_string(),
            source_path: DEFAULT_ANIMATION_PATH.to_string(),
            looping: true,
            autoplay: true,
            aspect_mode: AspectMode::Slice,
            renderer: Renderer::Svg,
        }
    }
}

impl AnimationSettings {
    /// 生成一次调用用的 `AnimationConfig`。
    pub fn to_animation_config(&self) -> AnimationConfig {
        AnimationConfig {
            mount_point_id: self.mount_point_id.clone(),
            source_path: self.source_path.clone(),
            looping: self.looping,
            autoplay: self.autoplay,
            aspect_mode: self.aspect_mode,
            renderer: self.renderer,
        }
    }
}

/// 分享 SDK 与分享文案配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// 分享 SDK 的 App Key。
    pub app_key: String,
    /// 分享卡片与链接指向的站点地址。
    pub site_url: String,
    pub title: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            site_url: DEFAULT_SITE_URL.to_string(),
            title: DEFAULT_SHARE_TITLE.to_string(),
        }
    }
}

/// 图床上传配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub endpoint: String,
    pub api_key: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            api_key: String::new(),
        }
    }
}

impl SnippetConfig {
    /// 从 JSON 文件加载配置；文件不存在时返回默认配置。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnippetError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("⚙️ 配置文件不存在，使用默认配置 - 路径: {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&content)
            .map_err(|e| SnippetError::Config(format!("解析配置文件失败: {}", e)))?;
        config.validate()?;

        log::info!("⚙️ 已加载配置 - 路径: {}", path.display());
        Ok(config)
    }

    /// 以格式化 JSON 写回文件。
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnippetError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SnippetError::Config(format!("序列化配置失败: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SnippetError> {
        let endpoint = self.upload.endpoint.trim();
        if endpoint.is_empty() {
            return Err(SnippetError::Config("upload.endpoint 不能为空".to_string()));
        }

        let url = reqwest::Url::parse(endpoint)
            .map_err(|e| SnippetError::Config(format!("upload.endpoint 格式错误: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SnippetError::Config(format!(
                "upload.endpoint 仅支持 http/https，当前为 {}",
                url.scheme()
            )));
        }

        if self.animation.mount_point_id.trim().is_empty() {
            return Err(SnippetError::Config("animation.mount_point_id 不能为空".to_string()));
        }
        Ok(())
    }
}
