//! 内容提取 - 业务能力层
//!
//! 从内容区域读取段落文本，失败时返回可记录的 [`ExtractionError`]

use tracing::{debug, info, warn};

use crate::browser::BrowserSession;
use crate::error::{BrowserError, ExtractionError};
use crate::utils::logging::truncate_text;
use crate::workflow::StageOutcome;

/// 提取内容区域的文本
///
/// 内容区域缺失、脚本失败或文本为空都是可恢复的；
/// 只有浏览器连接已断开才是致命的。
pub async fn extract_content<S>(
    session: &S,
    container_selector: &str,
    paragraph_selector: &str,
) -> StageOutcome<String, ExtractionError>
where
    S: BrowserSession + ?Sized,
{
    let paragraphs = match session
        .paragraph_texts(container_selector, paragraph_selector)
        .await
    {
        Ok(Some(paragraphs)) => paragraphs,
        Ok(None) => {
            return StageOutcome::Recoverable(ExtractionError::ContentRegionMissing {
                selector: container_selector.to_string(),
            })
        }
        Err(BrowserError::Disconnected) => {
            return StageOutcome::Fatal(BrowserError::Disconnected.into())
        }
        Err(e) => {
            warn!("读取段落失败: {}", e);
            return StageOutcome::Recoverable(ExtractionError::ScriptFailed {
                reason: e.to_string(),
            });
        }
    };
    debug!("内容区域共 {} 个段落", paragraphs.len());

    match join_paragraphs(&paragraphs) {
        Ok(text) => {
            info!("✓ 文本提取成功: {}", truncate_text(&text, 60));
            StageOutcome::Ok(text)
        }
        Err(e) => StageOutcome::Recoverable(e),
    }
}

/// 拼接段落文本
///
/// 每段先去除首尾空白，丢弃空段，按原顺序用换行连接。
pub fn join_paragraphs<T: AsRef<str>>(paragraphs: &[T]) -> Result<String, ExtractionError> {
    let text = paragraphs
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        return Err(ExtractionError::EmptyText);
    }
    Ok(text)
}
