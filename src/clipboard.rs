//! # 剪贴板写入模块（ClipboardWriter）
//!
//! ## 设计思路
//!
//! 复制文本是“发出即忘”的操作：调用方立即返回，结果只通过日志观察。
//! 但失败不应真正被隐藏，因此写入返回 `ClipboardWrite` 句柄：
//! 默认丢弃即可（忽略并记录日志），需要时也可以 `outcome().await` 查看结果。
//!
//! ## 实现思路
//!
//! - 处于 tokio 运行时内时使用 `spawn_blocking`，否则退回独立线程，调用方不会因缺少运行时而 panic。
//! - 写入结果经 `oneshot` 通道回传，两种线程来源对句柄透明。
//! - 成功记录 info 日志（包含文本），失败记录 error 日志，均在写入线程内完成。
//! - 系统剪贴板通过 `arboard` 访问；后端以 `ClipboardBackend` trait 注入，便于测试。
//! - Linux 下剪贴板内容由持有者进程提供，一次性进程需用 `SystemClipboard::holding()`
//!   保持所有权直到其他程序接管。

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::error::SnippetError;

/// 剪贴板后端。
pub trait ClipboardBackend: Send + Sync + 'static {
    fn set_text(&self, text: &str) -> Result<(), SnippetError>;
}

/// 系统剪贴板（arboard）。
///
/// 每次写入都新建 `arboard::Clipboard`，不跨线程持有句柄。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard {
    hold_until_replaced: bool,
}

impl SystemClipboard {
    /// 供写完即退出的进程使用：Linux 下写入会阻塞到剪贴板被其他程序替换为止。
    pub fn holding() -> Self {
        Self {
            hold_until_replaced: true,
        }
    }

    pub fn holds_until_replaced(&self) -> bool {
        self.hold_until_replaced
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), SnippetError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| SnippetError::Clipboard(e.to_string()))?;
        let result = if self.hold_until_replaced {
            set_text_and_wait(&mut clipboard, text)
        } else {
            clipboard.set_text(text.to_owned())
        };
        result.map_err(|e| SnippetError::Clipboard(e.to_string()))
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_text_and_wait(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    log::info!("📌 保持剪贴板所有权，等待其他程序接管");
    clipboard.set().wait().text(text.to_owned())
}

// 其他平台由系统持有剪贴板内容，进程退出不影响。
#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_text_and_wait(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text.to_owned())
}

/// 剪贴板写入器。
pub struct ClipboardWriter<B> {
    backend: Arc<B>,
}

impl ClipboardWriter<SystemClipboard> {
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClipboard::default()))
    }
}

impl<B: ClipboardBackend> ClipboardWriter<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// 异步写入文本，立即返回。
    ///
    /// 运行时内外均可调用。
    pub fn write_text(&self, text: impl Into<String>) -> ClipboardWrite {
        let text = text.into();
        let backend = Arc::clone(&self.backend);
        let (sender, receiver) = oneshot::channel();

        let work = move || {
            let result = backend.set_text(&text);
            match &result {
                Ok(()) => log::info!("📋 复制完成: {}", text),
                Err(err) => log::error!("复制失败: {}", err),
            }
            let _ = sender.send(result);
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let _ = runtime.spawn_blocking(work);
            }
            Err(_) => {
                log::debug!("未处于 tokio 运行时，使用独立线程写入剪贴板");
                if let Err(err) = std::thread::Builder::new()
                    .name("clipboard-write".to_string())
                    .spawn(work)
                {
                    log::error!("复制失败: 无法启动写入线程: {}", err);
                }
            }
        }

        ClipboardWrite { receiver }
    }
}

/// 一次剪贴板写入的结果句柄，丢弃即“发出即忘”。
#[must_use = "丢弃句柄即忽略结果；需要结果时调用 outcome().await"]
pub struct ClipboardWrite {
    receiver: oneshot::Receiver<Result<(), SnippetError>>,
}

impl ClipboardWrite {
    /// 等待写入完成并返回结果。
    pub async fn outcome(self) -> Result<(), SnippetError> {
        match self.receiver.await {
            Ok(result) => result,
            Err(_) => Err(SnippetError::Clipboard("写入任务异常退出".to_string())),
        }
    }

    /// 显式忽略结果（仍会记录日志）。
    pub fn detach(self) {}
}
