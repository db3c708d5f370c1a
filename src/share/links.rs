//! # 平台分享链接
//!
//! Twitter / Facebook 不需要 SDK，直接跳转到各自的分享 intent 地址。
//! 查询参数统一交给 `Url::parse_with_params` 编码，换行会被编码为 `%0A`。

use reqwest::Url;

use super::template::score_message;
use crate::config::ShareSettings;
use crate::error::SnippetError;

const TWITTER_INTENT_URL: &str = "https://twitter.com/intent/tweet";
const FACEBOOK_SHARE_URL: &str = "https://www.facebook.com/share.php";

fn share_text(settings: &ShareSettings, score: u32) -> String {
    format!("{}\n{}\n{}", settings.title, settings.site_url, score_message(score))
}

/// Twitter 发推 intent 链接。
pub fn twitter_intent_url(
    settings: &ShareSettings,
    image_url: &str,
    score: u32,
) -> Result<Url, SnippetError> {
    let text = share_text(settings, score);
    Url::parse_with_params(
        TWITTER_INTENT_URL,
        &[
            ("original_referer", image_url),
            ("url", image_url),
            ("text", text.as_str()),
        ],
    )
    .map_err(|e| SnippetError::MalformedInput(format!("无法构建 Twitter 链接：{}", e)))
}

/// Facebook 分享链接。
pub fn facebook_share_url(
    settings: &ShareSettings,
    image_url: &str,
    score: u32,
) -> Result<Url, SnippetError> {
    let text = share_text(settings, score);
    Url::parse_with_params(FACEBOOK_SHARE_URL, &[("u", image_url), ("quote", text.as_str())])
        .map_err(|e| SnippetError::MalformedInput(format!("无法构建 Facebook 链接：{}", e)))
}
