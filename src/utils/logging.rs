use crate::config::Config;
use crate::models::LabelReport;
use crate::services::RoundOutcome;
use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、运行日志文件和统计输出的辅助函数
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 输出
///
/// 默认级别 info，`verbose` 时为 debug；设置了 `RUST_LOG` 时以其为准。
/// 重复调用是安全的（只有第一次生效）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 在运行日志文件末尾写入本次执行的头部
///
/// 每个动作都是一次独立的进程，之前各轮的日志保留不动。
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `action`: 本次执行的动作
pub fn init_log_file(log_file_path: &Path, action: &str) -> Result<()> {
    let log_header = format!(
        "{}\n众包轮次日志 ({}) - {}\n{}\n",
        "=".repeat(60),
        action,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    file.write_all(log_header.as_bytes())?;
    Ok(())
}

/// 向运行日志文件追加一行
pub fn append_log_line(log_file_path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, action: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {}", action);
    info!("📁 工作目录: {}", config.directory);
    info!(
        "📊 每个 hit {} 列, 金标准在第 {} 列, 每个条目需要 {} 个答案",
        config.queries_per_hit, config.gold_standard_position, config.workers_per_hit
    );
    info!("{}", "=".repeat(60));
}

/// 一轮过滤结果的摘要行
pub fn round_summary(outcome: &RoundOutcome, total_rows: usize) -> String {
    format!(
        "第 {} 轮: 提交 {} 条, 拒绝 {} 条, 异常 {} 条, 计入 {} 票",
        outcome.round,
        total_rows,
        outcome.rejected.len(),
        outcome.anomalies.len(),
        outcome.votes_recorded
    )
}

/// 记录一轮的处理结果
pub fn log_round_complete(outcome: &RoundOutcome, total_rows: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ {}", round_summary(outcome, total_rows));
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `report`: 汇总结果
/// - `labels_path`: 标签文件路径
pub fn print_final_stats(report: &LabelReport, labels_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 数据统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ True: {}", report.counts.trues);
    info!("❌ False: {}", report.counts.falses);
    info!("❔ Unclear: {}", report.counts.unclear);
    info!("⏳ 未完成: {}", report.counts.incomplete);
    info!("完成率: {:.4}", report.completion_rate);
    info!("{}", "=".repeat(60));
    info!("\n标签已保存至: {}", labels_path.display());
}
