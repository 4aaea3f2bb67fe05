//! 阶段结果
//!
//! 区分"可以记录为数据的失败"和"必须中止调用的失败"

use crate::error::AppError;

/// 单个阶段的结果
#[derive(Debug)]
pub enum StageOutcome<T, R> {
    /// 阶段成功
    Ok(T),
    /// 可恢复：折叠进结果记录，流程继续
    Recoverable(R),
    /// 致命：中止本次调用
    Fatal(AppError),
}

impl<T, R> StageOutcome<T, R> {
    /// 折叠可恢复错误
    ///
    /// 只有 `Fatal` 会作为 `Err` 继续向上传播。
    pub fn fold(self) -> Result<Result<T, R>, AppError> {
        match self {
            StageOutcome::Ok(value) => Ok(Ok(value)),
            StageOutcome::Recoverable(e) => Ok(Err(e)),
            StageOutcome::Fatal(e) => Err(e),
        }
    }
}
