//! # 动画加载模块（AnimationLoader）
//!
//! ## 设计思路
//!
//! 动画引擎（lottie）本身是外部协作者，这里只负责“整理参数 → 调用引擎”。
//! 引擎通过 `AnimationEngine` trait 注入：页面内可以是脚本桥接，测试中是记录器。
//!
//! ## 实现思路
//!
//! - `AnimationConfig` → `LoadAnimationParams`，序列化形状与 `lottie.loadAnimation({...})` 一致。
//! - `deferred = true` 时提交到 `TaskQueue`，下一个 tick 才真正启动。
//! - 引擎失败只记录 error 日志，不向调用方传播（装饰性操作，尽力而为）。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SnippetError;
use crate::task_queue::TaskQueue;

/// 画面比例保持策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    /// 铺满容器，超出部分裁切（全屏雪花效果）。
    #[default]
    Slice,
    /// 完整显示，引擎默认行为。
    Meet,
}

impl AspectMode {
    /// 映射为引擎的 `preserveAspectRatio` 取值。
    pub fn preserve_aspect_ratio(self) -> &'static str {
        match self {
            Self::Slice => "xMidYMid slice",
            Self::Meet => "xMidYMid meet",
        }
    }
}

/// 渲染器类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    #[default]
    Svg,
    Canvas,
    Html,
}

/// 单次动画加载请求。
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// 挂载点 DOM 元素 id。
    pub mount_point_id: String,
    /// 动画 JSON 的站内路径或绝对 URL。
    pub source_path: String,
    pub looping: bool,
    pub autoplay: bool,
    pub aspect_mode: AspectMode,
    pub renderer: Renderer,
}

impl AnimationConfig {
    pub fn new(mount_point_id: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            mount_point_id: mount_point_id.into(),
            source_path: source_path.into(),
            looping: true,
            autoplay: true,
            aspect_mode: AspectMode::Slice,
            renderer: Renderer::Svg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererSettings {
    pub preserve_aspect_ratio: &'static str,
}

/// 传给引擎 `loadAnimation` 的参数对象。
///
/// `container` 为挂载点 id，由引擎侧解析成 DOM 元素。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAnimationParams {
    pub container: String,
    pub renderer: Renderer,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub autoplay: bool,
    pub path: String,
    pub renderer_settings: RendererSettings,
}

impl From<AnimationConfig> for LoadAnimationParams {
    fn from(config: AnimationConfig) -> Self {
        Self {
            container: config.mount_point_id,
            renderer: config.renderer,
            looping: config.looping,
            autoplay: config.autoplay,
            path: config.source_path,
            renderer_settings: RendererSettings {
                preserve_aspect_ratio: config.aspect_mode.preserve_aspect_ratio(),
            },
        }
    }
}

/// 动画引擎调用面：`loadAnimation({...})`。
pub trait AnimationEngine: Send + Sync {
    fn load_animation(&self, params: &LoadAnimationParams) -> Result<(), SnippetError>;
}

/// 动画加载器。
pub struct AnimationLoader<E> {
    engine: Arc<E>,
    queue: TaskQueue,
}

impl<E> AnimationLoader<E>
where
    E: AnimationEngine + 'static,
{
    pub fn new(engine: Arc<E>, queue: TaskQueue) -> Self {
        Self { engine, queue }
    }

    /// 配置并启动动画。
    ///
    /// `deferred` 为 `true` 时只入队，等任务队列下一个 tick 执行。
    pub fn load(&self, config: AnimationConfig, deferred: bool) {
        let params = LoadAnimationParams::from(config);

        if !deferred {
            start(self.engine.as_ref(), &params);
            return;
        }

        log::debug!("🕒 动画加载已入队 - 挂载点: {}", params.container);
        let engine = Arc::clone(&self.engine);
        self.queue.submit(move || start(engine.as_ref(), &params));
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }
}

fn start<E: AnimationEngine + ?Sized>(engine: &E, params: &LoadAnimationParams) {
    log::info!("❄️ 启动动画 - 挂载点: {} 资源: {}", params.container, params.path);
    if let Err(err) = engine.load_animation(params) {
        log::error!("动画启动失败 - 挂载点: {} 原因: {}", params.container, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEngine {
        calls: Mutex<Vec<LoadAnimationParams>>,
    }

    impl AnimationEngine for RecordingEngine {
        fn load_animation(&self, params: &LoadAnimationParams) -> Result<(), SnippetError> {
            self.calls.lock().expect("lock").push(params.clone());
            Ok(())
        }
    }

    struct FailingEngine;

    impl AnimationEngine for FailingEngine {
        fn load_animation(&self, _params: &LoadAnimationParams) -> Result<(), SnippetError> {
            Err(SnippetError::Bridge("container not found".to_string()))
        }
    }

    #[test]
    fn params_serialize_to_engine_shape() {
        let params = LoadAnimationParams::from(AnimationConfig::new(
            "lottie-snow-effect",
            "/lottie/snow-effect.json",
        ));

        let json = serde_json::to_value(&params).expect("serialize should succeed");

        assert_eq!(
            json,
            serde_json::json!({
                "container": "lottie-snow-effect",
                "renderer": "svg",
                "loop": true,
                "autoplay": true,
                "path": "/lottie/snow-effect.json",
                "rendererSettings": { "preserveAspectRatio": "xMidYMid slice" }
            })
        );
    }

    #[test]
    fn immediate_load_starts_synchronously() {
        let engine = Arc::new(RecordingEngine::default());
        let loader = AnimationLoader::new(Arc::clone(&engine), TaskQueue::new());

        let mut config = AnimationConfig::new("m", "https://lottie.host/a.json");
        config.looping = false;
        config.aspect_mode = AspectMode::Meet;
        loader.load(config, false);

        let calls = engine.calls.lock().expect("lock");
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].looping);
        assert_eq!(calls[0].renderer_settings.preserve_aspect_ratio, "xMidYMid meet");
        assert!(loader.queue().is_empty());
    }

    #[test]
    fn deferred_load_waits_for_next_tick() {
        let engine = Arc::new(RecordingEngine::default());
        let queue = TaskQueue::new();
        let loader = AnimationLoader::new(Arc::clone(&engine), queue.clone());

        loader.load(AnimationConfig::new("m", "/a.json"), true);

        assert!(engine.calls.lock().expect("lock").is_empty());
        assert_eq!(queue.len(), 1);

        queue.run_tick();

        let calls = engine.calls.lock().expect("lock");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].container, "m");
        assert_eq!(calls[0].path, "/a.json");
        assert!(calls[0].looping);
        assert!(calls[0].autoplay);
    }

    #[test]
    fn engine_failure_is_swallowed() {
        let loader = AnimationLoader::new(Arc::new(FailingEngine), TaskQueue::new());

        loader.load(AnimationConfig::new("missing", "/a.json"), false);
        loader.load(AnimationConfig::new("missing", "/a.json"), true);

        assert_eq!(loader.queue().run_until_idle(), 1);
    }
}
