//! 调用入口
//!
//! 从环境构造所有真实依赖并执行一次流水线。失败只返回通用响应，
//! 具体原因只写日志。

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, error};

use crate::browser::{BrowserLauncher, ChromiumLauncher};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{Clock, SystemClock};
use crate::models::StoredObjectKey;
use crate::orchestrator::ExtractionPipeline;
use crate::services::{DiskProbe, SysinfoDiskProbe};
use crate::storage::S3Storage;

/// 调用响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    /// 成功：对象已写入
    pub fn saved(key: &StoredObjectKey) -> Self {
        Self {
            status_code: 200,
            body: format!("Data saved to S3 at key: {}", key),
        }
    }

    /// 失败：不泄露内部细节
    pub fn internal_error() -> Self {
        Self {
            status_code: 500,
            body: "Internal Server Error".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// 处理一次触发
///
/// 触发事件本身不参与处理，只记录日志。
pub async fn handle_invocation(event: &JsonValue) -> InvocationResponse {
    debug!("收到触发事件: {}", event);

    let built = build_pipeline(
        |name| std::env::var(name).ok(),
        ChromiumLauncher,
        SysinfoDiskProbe,
        SystemClock,
    )
    .await;

    match built {
        Ok(pipeline) => pipeline.invoke().await,
        Err(e) => {
            error!("❌ 初始化失败: {}", e);
            InvocationResponse::internal_error()
        }
    }
}

/// 构造流水线
///
/// 配置和存储客户端在这里构造完成；`launcher` 与 `probe` 只被保存，
/// 要到 [`ExtractionPipeline::run`] 才会被使用。
pub async fn build_pipeline<F, L, D, C>(
    lookup: F,
    launcher: L,
    probe: D,
    clock: C,
) -> AppResult<ExtractionPipeline<L, D, S3Storage, C>>
where
    F: Fn(&str) -> Option<String>,
    L: BrowserLauncher,
    D: DiskProbe,
    C: Clock,
{
    let config = Config::from_lookup(lookup)?;
    let store = S3Storage::build(&config.storage_settings()).await?;

    Ok(ExtractionPipeline::new(config, launcher, probe, store, clock))
}
