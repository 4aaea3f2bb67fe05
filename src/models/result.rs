//! 结果数据模型
//!
//! 每次调用最多产生一条 [`InvocationResult`]，由 `ResultWriter` 存储到
//! [`StoredObjectKey`] 指定的位置。

use std::fmt::Display;

use serde::Serialize;

use crate::error::ExtractionError;

/// 单次调用的结果记录
///
/// `text` 与 `error` 恰好有一个被填充，构造后不可修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResult {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl InvocationResult {
    /// 提取成功的结果
    pub fn success(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: Some(text.into()),
            error: None,
        }
    }

    /// 提取失败的结果
    pub fn failure(url: impl Into<String>, error: &ExtractionError) -> Self {
        Self {
            url: url.into(),
            text: None,
            error: Some(error.to_string()),
        }
    }

    /// 根据提取结果打包
    pub fn from_extraction(url: impl Into<String>, extracted: Result<String, ExtractionError>) -> Self {
        match extracted {
            Ok(text) => Self::success(url, text),
            Err(e) => Self::failure(url, &e),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// 存储对象键
///
/// 形如 `<prefix>_<unix秒>.parquet`。同一秒内的两次调用会得到相同的键。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredObjectKey(String);

impl StoredObjectKey {
    /// 列式文件扩展名
    pub const EXTENSION: &'static str = "parquet";

    pub fn new(prefix: &str, unix_seconds: i64) -> Self {
        Self(format!("{}_{}.{}", prefix, unix_seconds, Self::EXTENSION))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StoredObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
