//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use std::time::Duration;

use tracing::info;

use crate::models::InvocationResult;

/// 记录调用开始信息
///
/// # 参数
/// - `target_url`: 目标页面
pub fn log_startup(target_url: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始提取页面内容");
    info!("🌐 目标页面: {}", target_url);
    info!("{}", "=".repeat(60));
}

/// 记录打包好的结果行预览
pub fn log_result_row(result: &InvocationResult) {
    match (result.text(), result.error()) {
        (Some(text), _) => info!(
            "📋 结果行已创建: url={} | text={}",
            result.url(),
            truncate_text(text, 80)
        ),
        (None, error) => info!(
            "📋 结果行已创建: url={} | error={}",
            result.url(),
            error.unwrap_or_default()
        ),
    }
}

/// 打印本次调用的统计信息
///
/// # 参数
/// - `status_code`: 响应状态码
/// - `elapsed`: 耗时
pub fn log_invocation_complete(status_code: u16, elapsed: Duration) {
    info!("{}", "─".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📊 状态码: {} | 耗时: {:.2} 秒", status_code, elapsed.as_secs_f64());
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本，换行替换为空格
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > max_len {
        flat.chars().take(max_len).collect::<String>() + "..."
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("Hello\nWorld", 20), "Hello World");
        assert_eq!(truncate_text("幸福感与健康", 2), "幸福...");
    }
}
