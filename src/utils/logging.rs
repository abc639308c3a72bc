//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info 级别。
/// 重复调用不会报错（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n答题会话日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录会话启动信息
///
/// # 参数
/// - `quiz_id`: 测验ID
/// - `total`: 题目总数
/// - `mode`: 渲染模式（memory / browser）
pub fn log_session_start(quiz_id: i64, total: usize, mode: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 答题会话启动 - 测验 #{}", quiz_id);
    info!("📋 共 {} 道题 | 渲染模式: {}", total, mode);
    info!("{}", "=".repeat(60));
}

/// 打印会话结束统计
///
/// # 参数
/// - `answered`: 已作答题目数
/// - `total`: 题目总数
/// - `submitted`: 是否提交成功
/// - `log_file_path`: 日志文件路径
pub fn log_session_end(answered: usize, total: usize, submitted: bool, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 答题会话结束");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✍️ 已作答: {}/{}", answered, total);
    if submitted {
        info!("✅ 答卷已提交");
    } else {
        info!("❌ 答卷未提交");
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
