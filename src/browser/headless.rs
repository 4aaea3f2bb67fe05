use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use serde::Deserialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::browser::session::{BrowserLauncher, BrowserSession};
use crate::config::BrowserSettings;
use crate::error::BrowserError;
use crate::infrastructure::JsExecutor;

/// 关闭浏览器时每一步（close、wait）允许的最长时间
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// 通过 chromiumoxide 启动本地 Chrome
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromiumLauncher;

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self, settings: &BrowserSettings) -> Result<ChromiumSession, BrowserError> {
        launch_headless_browser(settings).await
    }
}

/// 启动无头浏览器并打开空白页
async fn launch_headless_browser(
    settings: &BrowserSettings,
) -> Result<ChromiumSession, BrowserError> {
    info!("🚀 启动无头浏览器...");
    debug!(
        "Chrome 路径: {}, 调试端口: {}",
        settings.chrome_executable.display(),
        settings.debug_port
    );

    let config = BrowserConfig::builder()
        .new_headless_mode()
        .no_sandbox()
        .chrome_executable(&settings.chrome_executable)
        .port(settings.debug_port)
        .user_data_dir(&settings.user_data_dir)
        .request_timeout(settings.request_timeout)
        .args(settings.chrome_args())
        .build()
        .map_err(|e| {
            error!("配置无头浏览器失败: {}", e);
            BrowserError::LaunchFailed { reason: e }
        })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        BrowserError::LaunchFailed {
            reason: e.to_string(),
        }
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            error!("创建页面失败: {}", e);
            let session = ChromiumSession {
                browser,
                executor: None,
                handler_task,
            };
            session.terminate().await;
            return Err(BrowserError::PageCreationFailed {
                source: Box::new(e),
            });
        }
    };

    info!("✅ 无头浏览器已就绪");

    Ok(ChromiumSession {
        browser,
        executor: Some(JsExecutor::new(page)),
        handler_task,
    })
}

/// chromiumoxide 浏览器会话
///
/// 持有浏览器进程、唯一的页面以及 CDP 事件循环任务。
pub struct ChromiumSession {
    browser: Browser,
    executor: Option<JsExecutor>,
    handler_task: JoinHandle<()>,
}

impl ChromiumSession {
    fn executor(&self) -> Result<&JsExecutor, BrowserError> {
        if self.handler_task.is_finished() {
            return Err(BrowserError::Disconnected);
        }
        self.executor.as_ref().ok_or(BrowserError::Disconnected)
    }
}

/// 段落扫描脚本的返回值
#[derive(Debug, Deserialize)]
struct ParagraphScan {
    found: bool,
    paragraphs: Vec<String>,
}

fn paragraph_scan_script(container_selector: &str, paragraph_selector: &str) -> String {
    // serde_json 负责给选择器加引号和转义
    let container = serde_json::Value::from(container_selector);
    let paragraph = serde_json::Value::from(paragraph_selector);
    format!(
        r#"(() => {{
    const root = document.querySelector({container});
    if (!root) {{
        return {{ found: false, paragraphs: [] }};
    }}
    const paragraphs = Array.from(root.querySelectorAll({paragraph}))
        .map((p) => p.innerText || "");
    return {{ found: true, paragraphs }};
}})()"#
    )
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let executor = self.executor()?;
        debug!("发起导航: {}", url);

        let response = executor
            .page()
            .execute(NavigateParams::new(url))
            .await
            .map_err(|e| {
                error!("导航到 {} 失败: {}", url, e);
                BrowserError::NavigationFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            })?;

        if let Some(error_text) = response.result.error_text.clone() {
            error!("导航到 {} 失败: {}", url, error_text);
            return Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: error_text,
            });
        }

        Ok(())
    }

    async fn ready_state(&self) -> Result<String, BrowserError> {
        self.executor()?.eval_as("document.readyState").await
    }

    async fn paragraph_texts(
        &self,
        container_selector: &str,
        paragraph_selector: &str,
    ) -> Result<Option<Vec<String>>, BrowserError> {
        let script = paragraph_scan_script(container_selector, paragraph_selector);
        let scan: ParagraphScan = self.executor()?.eval_as(script).await?;
        debug!("找到 {} 个段落 (区域存在: {})", scan.paragraphs.len(), scan.found);

        Ok(scan.found.then_some(scan.paragraphs))
    }

    async fn terminate(mut self) {
        shutdown_process(&mut self.browser, SHUTDOWN_GRACE).await;
        self.handler_task.abort();
    }
}

/// 浏览器子进程的关闭操作
#[async_trait]
trait BrowserProcess: Send {
    /// 通过 CDP 请求浏览器退出
    async fn close(&mut self) -> Result<(), String>;
    /// 强制结束子进程
    async fn kill(&mut self) -> Result<(), String>;
    /// 等待子进程退出
    async fn wait(&mut self) -> Result<(), String>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn close(&mut self) -> Result<(), String> {
        Browser::close(self).await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn kill(&mut self) -> Result<(), String> {
        match Browser::kill(self).await {
            Some(Err(e)) => Err(e.to_string()),
            _ => Ok(()),
        }
    }

    async fn wait(&mut self) -> Result<(), String> {
        let status = Browser::wait(self).await.map_err(|e| e.to_string())?;
        debug!("浏览器进程已退出: {:?}", status);
        Ok(())
    }
}

/// 关闭浏览器进程
///
/// 先请求正常退出；close 失败或进程在 `grace` 内没有退出时强制结束。
/// 每一步都有时间上限，不会无限阻塞。
async fn shutdown_process<P: BrowserProcess + ?Sized>(process: &mut P, grace: Duration) {
    let closed = match timeout(grace, process.close()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!("关闭浏览器失败: {}", e);
            false
        }
        Err(_) => {
            warn!("关闭浏览器超时 ({:?})", grace);
            false
        }
    };

    if closed {
        match timeout(grace, process.wait()).await {
            Ok(Ok(())) => return,
            Ok(Err(e)) => warn!("等待浏览器进程退出失败: {}", e),
            Err(_) => warn!("浏览器进程在 {:?} 内未退出", grace),
        }
    }

    warn!("⚠️ 强制结束浏览器进程");
    if let Err(e) = process.kill().await {
        warn!("强制结束浏览器进程失败: {}", e);
    }
    match timeout(grace, process.wait()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("等待浏览器进程退出失败: {}", e),
        Err(_) => warn!("浏览器进程在强制结束后仍未退出"),
    }
}
