use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
///
/// 只有 `Extraction` 属于可恢复错误，会被折叠进存储的结果记录；
/// 其他类别都会让本次调用以失败响应结束。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 资源预检错误
    #[error("资源错误: {0}")]
    Resource(#[from] ResourceError),
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 内容提取错误
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 序列化或上传错误
    #[error("上传错误: {0}")]
    Upload(#[from] UploadError),
}

impl AppError {
    /// 是否可以转换为错误记录继续流程
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Extraction(_))
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必需的环境变量不存在或为空
    #[error("环境变量 {var_name} 未设置")]
    MissingEnvVar { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    InvalidEnvVar {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 资源预检错误
#[derive(Debug, Error)]
pub enum ResourceError {
    /// 临时目录可用空间不足
    #[error("{path} 可用空间不足: {available_mb:.2} MB < {required_mb} MB")]
    InsufficientDisk {
        path: String,
        available_mb: f64,
        required_mb: u64,
    },
    /// 无法查询磁盘空间
    #[error("无法查询 {path} 的磁盘空间: {reason}")]
    ProbeFailed { path: String, reason: String },
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器进程失败
    #[error("启动浏览器失败: {reason}")]
    LaunchFailed { reason: String },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {reason}")]
    NavigationFailed { url: String, reason: String },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 等待页面加载超时
    #[error("等待页面加载完成超时 ({timeout:?}), 最后状态: {last_state:?}")]
    ReadyTimeout {
        timeout: Duration,
        last_state: Option<String>,
    },
    /// 浏览器事件循环已退出
    #[error("浏览器连接已断开")]
    Disconnected,
}

impl BrowserError {
    pub fn script_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        BrowserError::ScriptFailed {
            source: Box::new(source),
        }
    }
}

/// 内容提取错误
///
/// `Display` 文本会原样写入结果记录的 `error` 列。
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 找不到内容区域
    #[error("Content region '{selector}' not found on the page.")]
    ContentRegionMissing { selector: String },
    /// 提取到的文本为空
    #[error("No text content extracted from the page.")]
    EmptyText,
    /// 提取脚本执行失败
    #[error("Failed to read paragraphs: {reason}")]
    ScriptFailed { reason: String },
}

/// 序列化或上传错误
#[derive(Debug, Error)]
pub enum UploadError {
    /// 列式编码失败
    #[error("编码 Parquet 失败: {source}")]
    Encode {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入对象存储失败
    #[error("上传到 {bucket}/{key} 失败: {source}")]
    Put {
        bucket: String,
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<parquet::errors::ParquetError> for UploadError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        UploadError::Encode {
            source: Box::new(err),
        }
    }
}

impl From<arrow::error::ArrowError> for UploadError {
    fn from(err: arrow::error::ArrowError) -> Self {
        UploadError::Encode {
            source: Box::new(err),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
