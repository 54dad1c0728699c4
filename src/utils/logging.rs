use anyhow::{Context, Result};
/// 日志工具模块
///
/// 提供日志格式化和报告文件输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

use crate::config::Config;
use crate::error::FileError;

/// 初始化报告文件
///
/// # 参数
/// - `log_file_path`: 报告文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n创意评估日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|source| FileError::WriteFailed {
        path: log_file_path.to_string(),
        source,
    })?;
    Ok(())
}

/// 向报告文件追加一段文本
pub fn append_to_log(log_file_path: &str, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开报告文件: {}", log_file_path))?;

    file.write_all(format!("{}\n", text).as_bytes())
        .map_err(|source| FileError::WriteFailed {
            path: log_file_path.to_string(),
            source,
        })?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 创意评估与完善检查");
    info!("📊 默认 top_k: {}", config.default_top_k);
    info!(
        "🔁 最大轮数: {}（指令宣称 {}）",
        config.max_rounds, config.advertised_max_rounds
    );
    info!("{}", "=".repeat(60));
}

/// 记录批次加载信息
pub fn log_batches_loaded(total: usize) {
    info!("✓ 找到 {} 个待处理的创意批次", total);
    info!("💡 逐批处理，批内创意并发检查\n");
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `source`: 批次来源文件
/// - `idea_count`: 本批创意数
pub fn log_batch_start(batch_num: usize, total_batches: usize, source: &str, idea_count: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 来源: {} | 共 {} 个创意", source, idea_count);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
pub fn log_batch_complete(batch_num: usize, passed: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 检查通过 {}/{}", batch_num, passed, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(
    success: usize,
    failed: usize,
    total: usize,
    passed: usize,
    ideas: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功批次: {}/{}", success, total);
    info!("❌ 失败批次: {}", failed);
    info!("🧪 检查通过创意: {}/{}", passed, ideas);
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", log_file_path);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_by_chars() {
        assert_eq!(truncate_text("联邦学习隐私保护", 4), "联邦学习...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
