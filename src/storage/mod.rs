//! 对象存储能力
//!
//! 只暴露"按键写入对象"，客户端构造见 [`s3::S3Storage::build`]。

pub mod s3;

use async_trait::async_trait;

use crate::error::UploadError;

pub use s3::S3Storage;

/// 对象存储
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 绑定的存储桶
    fn bucket(&self) -> &str;

    /// 写入一个对象
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), UploadError>;
}
