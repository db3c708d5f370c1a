//! # 脚本桥接模块
//!
//! ## 设计思路
//!
//! 动画引擎与分享 SDK 都只存在于页面脚本环境中。`ScriptBridge` 把两者的调用
//! 渲染成等价的 JavaScript 语句，交给 `ScriptSink` 执行：
//! WebView 的 `eval`、页面构建时的内联脚本、或直接输出到终端。
//!
//! ## 实现思路
//!
//! - 所有字面量经 `serde_json` 序列化，保证是合法的 JS 字面量。
//! - `</` 转义为 `<\/`，内联进 `<script>` 标签时不会提前闭合。
//! - `container` 渲染为 `document.getElementById(...)`，由页面解析挂载点。

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

use crate::animation::{AnimationEngine, LoadAnimationParams};
use crate::error::SnippetError;
use crate::share::ShareSdk;

/// 脚本执行端。
pub trait ScriptSink: Send + Sync {
    fn eval(&self, script: &str) -> Result<(), SnippetError>;
}

impl<F> ScriptSink for F
where
    F: Fn(&str) -> Result<(), SnippetError> + Send + Sync,
{
    fn eval(&self, script: &str) -> Result<(), SnippetError> {
        self(script)
    }
}

/// 收集脚本的内存执行端，用于页面构建时批量内联。
#[derive(Default)]
pub struct ScriptBuffer {
    scripts: Mutex<Vec<String>>,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出并清空已收集的脚本。
    pub fn take(&self) -> Vec<String> {
        match self.scripts.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl ScriptSink for ScriptBuffer {
    fn eval(&self, script: &str) -> Result<(), SnippetError> {
        self.scripts
            .lock()
            .map_err(|_| SnippetError::Bridge("脚本缓冲锁已中毒".to_string()))?
            .push(script.to_string());
        Ok(())
    }
}

/// 将引擎 / SDK 调用渲染为 JavaScript 的桥接器。
pub struct ScriptBridge<S> {
    sink: S,
}

impl<S: ScriptSink> ScriptBridge<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// 序列化为可内联的 JS 字面量。
pub fn js_literal<T: Serialize + ?Sized>(value: &T) -> Result<String, SnippetError> {
    let json = serde_json::to_string(value)
        .map_err(|e| SnippetError::Bridge(format!("序列化脚本参数失败：{}", e)))?;
    Ok(json.replace("</", "<\\/"))
}

/// 渲染 `lottie.loadAnimation({...})` 调用。
pub fn render_load_animation(params: &LoadAnimationParams) -> Result<String, SnippetError> {
    let Value::Object(mut fields) = serde_json::to_value(params)
        .map_err(|e| SnippetError::Bridge(format!("序列化动画参数失败：{}", e)))?
    else {
        return Err(SnippetError::Bridge("动画参数未序列化为对象".to_string()));
    };
    fields.remove("container");

    let mut entries = vec![format!(
        "\"container\":document.getElementById({})",
        js_literal(&params.container)?
    )];
    for (key, value) in &fields {
        entries.push(format!("{}:{}", js_literal(key)?, js_literal(value)?));
    }

    Ok(format!("lottie.loadAnimation({{{}}});", entries.join(",")))
}

impl<S: ScriptSink> AnimationEngine for ScriptBridge<S> {
    fn load_animation(&self, params: &LoadAnimationParams) -> Result<(), SnippetError> {
        let script = render_load_animation(params)?;
        self.sink.eval(&script)
    }
}

impl<S: ScriptSink> ShareSdk for ScriptBridge<S> {
    fn init(&self, key: &str) -> Result<(), SnippetError> {
        self.sink.eval(&format!("Kakao.init({});", js_literal(key)?))
    }

    fn send_default(&self, options: &Value) -> Result<(), SnippetError> {
        self.sink
            .eval(&format!("Kakao.Share.sendDefault({});", js_literal(options)?))
    }
}
