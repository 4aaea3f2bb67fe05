//! 浏览器会话能力
//!
//! 编排层只通过这里的 trait 使用浏览器，真实实现见 [`super::headless`]。

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::BrowserSettings;
use crate::error::BrowserError;

/// 启动浏览器进程的能力
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Session: BrowserSession + 'static;

    /// 启动一个新的浏览器进程，失败即为本次调用的致命错误
    async fn launch(&self, settings: &BrowserSettings) -> Result<Self::Session, BrowserError>;
}

/// 一个正在运行的浏览器进程
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 发起页面加载，不等待加载完成
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// 当前的 `document.readyState`
    async fn ready_state(&self) -> Result<String, BrowserError>;

    /// 内容区域内所有段落的可见文本（文档顺序）
    ///
    /// 内容区域不存在时返回 `Ok(None)`。
    async fn paragraph_texts(
        &self,
        container_selector: &str,
        paragraph_selector: &str,
    ) -> Result<Option<Vec<String>>, BrowserError>;

    /// 关闭浏览器进程。错误只记录日志，不向上传播。
    async fn terminate(self);
}

/// 轮询等待页面加载完成
///
/// 每隔 `interval` 查询一次 `document.readyState`，直到为 `complete`。
/// 单次查询也受剩余时间约束，超过 `timeout` 返回 [`BrowserError::ReadyTimeout`]。
/// 导航刚发起时旧的执行上下文可能已销毁，`ScriptFailed` 视为"尚未就绪"继续轮询。
pub async fn await_ready<S>(
    session: &S,
    timeout: Duration,
    interval: Duration,
) -> Result<(), BrowserError>
where
    S: BrowserSession + ?Sized,
{
    let deadline = Instant::now() + timeout;
    let mut last_state = None;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match tokio::time::timeout(remaining, session.ready_state()).await {
            Err(_) => {
                return Err(BrowserError::ReadyTimeout {
                    timeout,
                    last_state,
                })
            }
            Ok(Ok(state)) => {
                debug!("document.readyState = {}", state);
                if state == "complete" {
                    return Ok(());
                }
                last_state = Some(state);
            }
            Ok(Err(BrowserError::ScriptFailed { source })) => {
                debug!("读取 readyState 失败，继续等待: {}", source);
            }
            Ok(Err(e)) => return Err(e),
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(BrowserError::ReadyTimeout {
                timeout,
                last_state,
            });
        }
        sleep(interval.min(deadline - now)).await;
    }
}

/// 会话守卫
///
/// 持有唯一的浏览器会话，保证 `terminate` 恰好调用一次：
/// 1. 正常路径调用 [`SessionGuard::release`] 并等待关闭完成
/// 2. 未释放就被 drop（例如 panic）时，在运行时上派生关闭任务
pub struct SessionGuard<S: BrowserSession + 'static> {
    session: Option<S>,
    runtime_handle: tokio::runtime::Handle,
}

impl<S: BrowserSession + 'static> SessionGuard<S> {
    /// 必须在 tokio 运行时内调用
    pub fn new(session: S) -> Self {
        Self {
            session: Some(session),
            runtime_handle: tokio::runtime::Handle::current(),
        }
    }

    /// 获取会话引用
    pub fn session(&self) -> &S {
        // 只有 release（消耗守卫）和 drop 会取走会话
        self.session
            .as_ref()
            .expect("SessionGuard: session already released")
    }

    /// 关闭浏览器，消耗守卫
    pub async fn release(mut self) {
        if let Some(session) = self.session.take() {
            session.terminate().await;
            info!("🧹 浏览器已关闭");
        }
    }
}

impl<S: BrowserSession + 'static> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            warn!("会话守卫未显式释放，在后台关闭浏览器");
            self.runtime_handle.spawn(async move {
                session.terminate().await;
            });
        }
    }
}
