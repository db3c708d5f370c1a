//! # 页面辅助片段 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                页面脚本环境（lottie / Kakao）             │
//! └───────────────────────────▲──────────────────────────────┘
//!                             │ ScriptSink（eval / 内联脚本）
//! ┌───────────────────────────┼──────────────────────────────┐
//! │  bridge ── ScriptBridge: AnimationEngine + ShareSdk      │
//! │                           │                              │
//! │  animation ── AnimationLoader ──(deferred)── task_queue  │
//! │  share ────── ShareClient → ShareContext                 │
//! │  upload ───── ImageUploader ── reqwest multipart → 图床   │
//! │  clipboard ── ClipboardWriter ── arboard                 │
//! │                                                          │
//! │  config ── SnippetConfig (JSON)    error ── SnippetError │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `SnippetError` |
//! | [`config`] | 动画路径、上传接口、各类密钥的 JSON 配置 |
//! | [`task_queue`] | 显式的 next-tick 任务队列 |
//! | [`animation`] | 动画参数整理与（可延迟的）启动 |
//! | [`share`] | 分享 SDK 上下文、分享模板与平台链接 |
//! | [`upload`] | Data URL 上传到图床 |
//! | [`clipboard`] | 发出即忘的剪贴板文本写入 |
//! | [`bridge`] | 将引擎 / SDK 调用渲染为页面脚本 |

pub mod error;
pub mod config;
pub mod task_queue;
pub mod animation;
pub mod share;
pub mod upload;
pub mod clipboard;
pub mod bridge;

pub use error::{SnippetError, TransportError};
