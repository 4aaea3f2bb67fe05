//! 提取流水线 - 编排层
//!
//! ## 流程
//!
//! ```text
//! Preflight → SessionStart → Navigate → AwaitReady → Extract
//!     → Package → Upload → Teardown
//! ```
//!
//! - Preflight / SessionStart / Navigate / AwaitReady 失败：中止，不写任何对象
//! - Extract 失败：写入带 `error` 的结果记录，流程继续
//! - Upload 失败：中止，即使提取成功
//! - Teardown：只要浏览器启动成功，就恰好执行一次

use std::time::Instant;

use tracing::{error, info};

use crate::browser::{await_ready, BrowserLauncher, BrowserSession, SessionGuard};
use crate::config::{Config, CONTENT_SELECTOR, PARAGRAPH_SELECTOR};
use crate::error::AppResult;
use crate::infrastructure::Clock;
use crate::models::{InvocationResult, StoredObjectKey};
use crate::orchestrator::handler::InvocationResponse;
use crate::services::{extract_content, DiskProbe, ResourcePreflight, ResultWriter};
use crate::storage::ObjectStore;
use crate::utils::logging;

/// 提取流水线
///
/// 独占本次调用的浏览器会话和存储客户端，不在调用之间共享任何状态。
pub struct ExtractionPipeline<L, D, O, C> {
    config: Config,
    launcher: L,
    preflight: ResourcePreflight<D>,
    store: O,
    clock: C,
}

impl<L, D, O, C> ExtractionPipeline<L, D, O, C>
where
    L: BrowserLauncher,
    D: DiskProbe,
    O: ObjectStore,
    C: Clock,
{
    pub fn new(config: Config, launcher: L, probe: D, store: O, clock: C) -> Self {
        let preflight =
            ResourcePreflight::new(probe, config.scratch_dir.clone(), config.min_free_disk_mb);
        Self {
            config,
            launcher,
            preflight,
            store,
            clock,
        }
    }

    /// 执行一次调用并转换为响应
    pub async fn invoke(&self) -> InvocationResponse {
        let started = Instant::now();
        logging::log_startup(&self.config.target_url);

        let response = match self.run().await {
            Ok(key) => {
                info!("✅ 结果已保存到存储, 键: {}", key);
                InvocationResponse::saved(&key)
            }
            Err(e) => {
                error!("❌ 发生错误: {}", e);
                InvocationResponse::internal_error()
            }
        };

        logging::log_invocation_complete(response.status_code, started.elapsed());
        response
    }

    /// 执行完整流程，返回写入的对象键
    pub async fn run(&self) -> AppResult<StoredObjectKey> {
        self.preflight.check()?;

        let session = self
            .launcher
            .launch(&self.config.browser_settings())
            .await?;
        info!("✓ 浏览器会话已启动");

        let guard = SessionGuard::new(session);
        let outcome = self.drive(guard.session()).await;
        guard.release().await;

        outcome
    }

    /// 导航、等待、提取、打包、上传
    async fn drive(&self, session: &L::Session) -> AppResult<StoredObjectKey> {
        let url = &self.config.target_url;

        session.navigate(url).await?;
        await_ready(
            session,
            self.config.ready_timeout,
            self.config.ready_poll_interval,
        )
        .await?;
        info!("✓ 页面加载完成: {}", url);

        let extracted = extract_content(session, CONTENT_SELECTOR, PARAGRAPH_SELECTOR)
            .await
            .fold()?;
        if let Err(e) = &extracted {
            error!("提取文本出错: {}", e);
        }

        let result = InvocationResult::from_extraction(url.as_str(), extracted);
        logging::log_result_row(&result);

        let key = StoredObjectKey::new(&self.config.object_key_prefix, self.clock.unix_seconds());
        ResultWriter::new(&self.store)
            .write(&result, self.store.bucket(), &key)
            .await?;

        Ok(key)
    }
}
