//! # 分享模块（ShareClient）
//!
//! ## 设计思路
//!
//! 分享 SDK（Kakao）的初始化在页面内是全局状态。这里改为显式上下文：
//! `ShareClient::init` 返回 `ShareContext`，只有拿到上下文才能调用 `share`，
//! “必须先 init”由类型保证，而不是隐藏的全局单例。
//!
//! ## 实现思路
//!
//! - `share` 只校验“能解析为 JSON 对象”，不校验字段，解析结果原样转发给 `sendDefault`。
//! - 解析失败返回 `MalformedInput`，且绝不调用 SDK。
//! - SDK 发送失败只记录日志：失败由 SDK 自身 UI 反馈，不属于本组件契约。
//! - `template` 构建分享卡片与文案，`links` 构建各平台分享链接。

pub mod links;
pub mod template;

use std::sync::Arc;

use serde_json::Value;

use crate::error::SnippetError;

/// 分享 SDK 调用面：`init(key)` 与 `Share.sendDefault(options)`。
pub trait ShareSdk: Send + Sync {
    fn init(&self, key: &str) -> Result<(), SnippetError>;
    fn send_default(&self, options: &Value) -> Result<(), SnippetError>;
}

/// 尚未初始化的分享客户端。
pub struct ShareClient<S> {
    sdk: Arc<S>,
}

/// 已初始化的分享上下文，生命周期与页面 / 会话一致，无显式销毁。
pub struct ShareContext<S> {
    sdk: Arc<S>,
}

impl<S: ShareSdk> ShareClient<S> {
    pub fn new(sdk: Arc<S>) -> Self {
        Self { sdk }
    }

    /// 使用 App Key 初始化 SDK。
    pub fn init(self, key: &str) -> Result<ShareContext<S>, SnippetError> {
        if key.trim().is_empty() {
            log::warn!("⚠️ 分享 SDK 使用空 App Key 初始化");
        }
        self.sdk.init(key)?;
        log::info!("🔑 分享 SDK 初始化完成");
        Ok(ShareContext { sdk: self.sdk })
    }
}

impl<S: ShareSdk> ShareContext<S> {
    /// 解析序列化的分享参数并触发默认分享动作。
    pub fn share(&self, serialized_options: &str) -> Result<(), SnippetError> {
        let options = parse_share_options(serialized_options)?;
        self.forward(&options);
        Ok(())
    }

    /// 直接转发已构建好的分享参数（同样要求是 JSON 对象）。
    pub fn share_value(&self, options: &Value) -> Result<(), SnippetError> {
        if !options.is_object() {
            return Err(SnippetError::MalformedInput(format!(
                "分享参数必须是 JSON 对象，实际为 {}",
                json_kind(options)
            )));
        }
        self.forward(options);
        Ok(())
    }

    fn forward(&self, options: &Value) {
        match self.sdk.send_default(options) {
            Ok(()) => log::info!("📤 已发起分享"),
            Err(err) => log::error!("分享发送失败: {}", err),
        }
    }
}

/// 将序列化文本解析为分享参数对象。
pub fn parse_share_options(serialized: &str) -> Result<Value, SnippetError> {
    let value = serde_json::from_str::<Value>(serialized)
        .map_err(|e| SnippetError::MalformedInput(format!("分享参数不是合法 JSON：{}", e)))?;

    if !value.is_object() {
        return Err(SnippetError::MalformedInput(format!(
            "分享参数必须是 JSON 对象，实际为 {}",
            json_kind(&value)
        )));
    }
    Ok(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSdk {
        keys: Mutex<Vec<String>>,
        sent: Mutex<Vec<Value>>,
    }

    impl ShareSdk for RecordingSdk {
        fn init(&self, key: &str) -> Result<(), SnippetError> {
            self.keys.lock().expect("lock").push(key.to_string());
            Ok(())
        }

        fn send_default(&self, options: &Value) -> Result<(), SnippetError> {
            self.sent.lock().expect("lock").push(options.clone());
            Ok(())
        }
    }

    struct RejectingSdk;

    impl ShareSdk for RejectingSdk {
        fn init(&self, _key: &str) -> Result<(), SnippetError> {
            Ok(())
        }

        fn send_default(&self, _options: &Value) -> Result<(), SnippetError> {
            Err(SnippetError::Bridge("Kakao is not defined".to_string()))
        }
    }

    #[test]
    fn init_passes_key_to_sdk() {
        let sdk = Arc::new(RecordingSdk::default());
        let _context = ShareClient::new(Arc::clone(&sdk)).init("app-key").expect("init");

        assert_eq!(*sdk.keys.lock().expect("lock"), vec!["app-key".to_string()]);
    }

    #[test]
    fn share_forwards_parsed_object_unchanged() {
        let sdk = Arc::new(RecordingSdk::default());
        let context = ShareClient::new(Arc::clone(&sdk)).init("k").expect("init");

        let options = json!({
            "objectType": "feed",
            "content": { "title": "t", "imageUrl": "https://i.ibb.co/x.png" },
            "buttons": [{ "title": "go" }]
        });
        context.share(&options.to_string()).expect("share should succeed");

        assert_eq!(*sdk.sent.lock().expect("lock"), vec![options]);
    }

    #[test]
    fn malformed_options_never_reach_sdk() {
        let sdk = Arc::new(RecordingSdk::default());
        let context = ShareClient::new(Arc::clone(&sdk)).init("k").expect("init");

        for input in ["", "{", "{\"a\":}", "not json", "[1, 2]", "42", "null"] {
            let result = context.share(input);
            assert!(matches!(result, Err(SnippetError::MalformedInput(_))), "input: {input:?}");
        }

        assert!(sdk.sent.lock().expect("lock").is_empty());
    }

    #[test]
    fn share_value_rejects_non_object() {
        let sdk = Arc::new(RecordingSdk::default());
        let context = ShareClient::new(Arc::clone(&sdk)).init("k").expect("init");

        assert!(matches!(
            context.share_value(&json!("feed")),
            Err(SnippetError::MalformedInput(_))
        ));
        assert!(sdk.sent.lock().expect("lock").is_empty());
    }

    #[test]
    fn sdk_send_failure_is_not_propagated() {
        let context = ShareClient::new(Arc::new(RejectingSdk)).init("k").expect("init");

        assert!(context.share("{}").is_ok());
    }
}
