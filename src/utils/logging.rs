/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use crate::config::Config;
use crate::models::loaders::Dataset;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时 `verbose` 决定默认级别（debug / info）。
/// 日志写到 stderr，stdout 留给 JSON 结果。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 词汇题目生成");
    info!(
        "📂 词库: {}",
        config.dataset_path.as_deref().unwrap_or("内置样本")
    );
    info!("⏱️ 请求超时: {} 秒", config.request_timeout_secs);
    if let Some(seed) = config.rng_seed {
        info!("🎲 固定随机种子: {}", seed);
    }
    info!("{}", "=".repeat(60));
}

/// 记录词库加载信息
pub fn log_dataset_loaded(dataset: &Dataset) {
    info!("✓ 词库加载完成: {} 个词汇 (来源: {})", dataset.len(), dataset.source);
}

/// 记录请求开始
pub fn log_request_start(input: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📝 收到请求: {}", truncate_text(input, 50));
}

/// 记录生成结果
///
/// # 参数
/// - `generated`: 生成的题目数
/// - `requested`: 请求的题目数
/// - `filtered`: 符合条件的词汇数
pub fn log_generation_complete(generated: usize, requested: usize, filtered: usize) {
    info!(
        "✅ 生成完成: {}/{} 题 (符合条件的词汇 {} 个)",
        generated, requested, filtered
    );
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
