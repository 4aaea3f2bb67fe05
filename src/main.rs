use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use wellbeing_scraper::{handle_invocation, logger};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 触发事件（可选，JSON 字符串）
    let event: JsonValue = match std::env::args().nth(1) {
        Some(raw) => serde_json::from_str(&raw).context("无法解析触发事件 JSON")?,
        None => JsonValue::Null,
    };

    let response = handle_invocation(&event).await;
    println!("{}", serde_json::to_string(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
