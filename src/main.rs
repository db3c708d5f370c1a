//! # 页面辅助片段 — 命令行入口
//!
//! 本文件仅负责参数解析与调用分发，业务逻辑见 `lib.rs` 各模块。
//!
//! ```text
//! web-snippets [--config <path>] upload <file>
//! web-snippets [--config <path>] copy <text>
//! web-snippets [--config <path>] links --image-url <url> --score <n> [--copy]
//! web-snippets [--config <path>] script animation [--deferred]
//! web-snippets [--config <path>] script share --image-url <url> --score <n>
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use web_snippets::animation::AnimationLoader;
use web_snippets::bridge::ScriptBridge;
use web_snippets::clipboard::{ClipboardWriter, SystemClipboard};
use web_snippets::config::SnippetConfig;
use web_snippets::share::{ShareClient, links, template};
use web_snippets::task_queue::TaskQueue;
use web_snippets::upload::{ImageUploader, data_url_from_bytes};
use web_snippets::SnippetError;

const DEFAULT_CONFIG_PATH: &str = "web-snippets.json";

fn arg_error(err: pico_args::Error) -> SnippetError {
    SnippetError::MalformedInput(format!("命令行参数错误: {}", err))
}

fn print_script(script: &str) -> Result<(), SnippetError> {
    println!("{}", script);
    Ok(())
}

/// 命令写完剪贴板即退出，需持有所有权直到其他程序接管。
async fn copy_to_clipboard(text: String) -> Result<(), SnippetError> {
    ClipboardWriter::new(Arc::new(SystemClipboard::holding()))
        .write_text(text)
        .outcome()
        .await
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// 读取待上传内容：文本形式的 Data URL 原样使用，其余按图片文件编码。
fn read_data_url(path: &Path) -> Result<String, SnippetError> {
    let bytes = std::fs::read(path)?;
    if bytes.starts_with(b"data:") {
        let text = String::from_utf8(bytes)
            .map_err(|e| SnippetError::MalformedInput(format!("Data URL 不是合法 UTF-8: {}", e)))?;
        return Ok(text.trim().to_string());
    }
    Ok(data_url_from_bytes(guess_mime(path), &bytes))
}

async fn run(mut args: pico_args::Arguments) -> Result<(), SnippetError> {
    let config_path: PathBuf = args
        .opt_value_from_str("--config")
        .map_err(arg_error)?
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = SnippetConfig::load(&config_path)?;

    let command = args.subcommand().map_err(arg_error)?;
    match command.as_deref() {
        Some("upload") => {
            let file: PathBuf = args.free_from_str().map_err(arg_error)?;
            let data_url = read_data_url(&file)?;
            let uploader = ImageUploader::new(&config.upload)?;
            let result = uploader.upload(&data_url).await?;
            let pretty = serde_json::to_string_pretty(result.json())
                .map_err(SnippetError::MalformedResponse)?;
            println!("{}", pretty);
        }
        Some("copy") => {
            let text: String = args.free_from_str().map_err(arg_error)?;
            copy_to_clipboard(text).await?;
        }
        Some("links") => {
            let copy = args.contains("--copy");
            let image_url: String = args.value_from_str("--image-url").map_err(arg_error)?;
            let score: u32 = args.value_from_str("--score").map_err(arg_error)?;

            let settings = &config.share;
            println!("twitter:  {}", links::twitter_intent_url(settings, &image_url, score)?);
            println!("facebook: {}", links::facebook_share_url(settings, &image_url, score)?);
            println!("kakao:    {}", template::feed_template(settings, &image_url, score));
            let copy_text = template::copy_link_text(settings, &image_url, score);
            println!("copy:\n{}", copy_text);
            if copy {
                copy_to_clipboard(copy_text).await?;
            }
        }
        Some("script") => {
            let deferred = args.contains("--deferred");
            let image_url: Option<String> = args.opt_value_from_str("--image-url").map_err(arg_error)?;
            let score: Option<u32> = args.opt_value_from_str("--score").map_err(arg_error)?;
            let target: String = args.free_from_str().map_err(arg_error)?;
            let bridge = Arc::new(ScriptBridge::new(print_script));

            match target.as_str() {
                "animation" => {
                    let queue = TaskQueue::new();
                    let loader = AnimationLoader::new(bridge, queue.clone());
                    loader.load(config.animation.to_animation_config(), deferred);
                    queue.run_until_idle();
                }
                "share" => {
                    let (Some(image_url), Some(score)) = (image_url, score) else {
                        return Err(SnippetError::MalformedInput(
                            "script share 需要 --image-url 与 --score".to_string(),
                        ));
                    };
                    let context = ShareClient::new(bridge).init(&config.share.app_key)?;
                    context.share_value(&template::feed_template(&config.share, &image_url, score))?;
                }
                other => {
                    return Err(SnippetError::MalformedInput(format!(
                        "未知脚本类型：{}（可选：animation / share）",
                        other
                    )));
                }
            }
        }
        Some(other) => {
            return Err(SnippetError::MalformedInput(format!(
                "未知命令：{}（可选：upload / copy / links / script）",
                other
            )));
        }
        None => {
            return Err(SnippetError::MalformedInput(
                "缺少命令（可选：upload / copy / links / script）".to_string(),
            ));
        }
    }

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("忽略多余参数: {:?}", rest);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(pico_args::Arguments::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("执行失败 [{}]: {}", err.code(), err);
            ExitCode::FAILURE
        }
    }
}
