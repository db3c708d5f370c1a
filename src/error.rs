//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 所有组件共用一个 `SnippetError` 枚举，替代分散的字符串错误。
//! 上传与分享把错误返回给调用方；动画加载与剪贴板写入只记录日志、不向上抛出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - `TransportError` 区分“请求本身失败”与“服务端返回非 2xx”，两者都归为传输错误。
//! - `code()` 提供稳定的机器可读错误码。
//! - 实现 `Serialize` 将错误序列化为字符串，便于回传给 WebView。

use serde::Serialize;

/// 传输层错误：网络失败或非 2xx 状态码。
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// 请求未能完成（连接、TLS、读取响应体等）
    #[error("请求失败：{0}")]
    Request(#[from] reqwest::Error),

    /// 服务端返回了非成功状态码
    #[error("服务端返回异常状态：{0}")]
    Status(reqwest::StatusCode),
}

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    /// 调用方输入格式错误（Data URL 缺少逗号、分享参数不是合法 JSON 对象）
    #[error("输入格式错误：{0}")]
    MalformedInput(String),

    /// 网络 / HTTP 失败
    #[error("传输错误：{0}")]
    Transport(#[from] TransportError),

    /// 响应体无法解析为 JSON
    #[error("响应解析失败：{0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// 剪贴板读写失败
    #[error("剪贴板操作失败：{0}")]
    Clipboard(String),

    /// 脚本桥接（WebView / 输出端）执行失败
    #[error("脚本执行失败：{0}")]
    Bridge(String),

    /// 配置非法
    #[error("配置错误：{0}")]
    Config(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误：{0}")]
    Io(#[from] std::io::Error),
}

impl SnippetError {
    /// 稳定错误码，供日志检索与前端分支判断。
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "malformed_input",
            Self::Transport(_) => "transport",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Clipboard(_) => "clipboard",
            Self::Bridge(_) => "bridge",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for SnippetError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_maps_to_transport_code() {
        let error = SnippetError::from(TransportError::Status(reqwest::StatusCode::BAD_GATEWAY));

        assert_eq!(error.code(), "transport");
        assert!(error.to_string().contains("502"));
    }

    #[test]
    fn error_serializes_as_display_string() {
        let error = SnippetError::MalformedInput("缺少逗号".to_string());
        let json = serde_json::to_string(&error).expect("serialize should succeed");

        assert_eq!(json, "\"输入格式错误：缺少逗号\"");
    }
}
