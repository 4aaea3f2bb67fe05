use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, error, info};

use crate::config::StorageSettings;
use crate::error::{ConfigError, UploadError};
use crate::storage::ObjectStore;

/// S3 存储客户端
///
/// 每次调用构造一次，绑定一个存储桶，不在调用之间共享。
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// 构造客户端
    ///
    /// 区域或存储桶为空时立即失败，不做任何网络请求。
    pub async fn build(settings: &StorageSettings) -> Result<Self, ConfigError> {
        if settings.region_name.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                var_name: "REGION_NAME".to_string(),
            });
        }
        if settings.bucket_name.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                var_name: "BUCKET_NAME".to_string(),
            });
        }

        let timeout_config = TimeoutConfig::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .build();
        let retry_config = RetryConfig::standard().with_max_attempts(settings.max_attempts);

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region_name.clone()))
            .timeout_config(timeout_config)
            .retry_config(retry_config)
            .load()
            .await;

        info!(
            "✓ 存储客户端初始化成功 (区域: {}, 存储桶: {})",
            settings.region_name, settings.bucket_name
        );

        Ok(Self {
            client: Client::new(&sdk_config),
            bucket: settings.bucket_name.clone(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), UploadError> {
        debug!("上传对象: s3://{}/{} ({} 字节)", bucket, key, body.len());

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                error!("上传 Parquet 文件到 S3 失败: {}", e);
                UploadError::Put {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    source: Box::new(e),
                }
            })?;

        Ok(())
    }
}
