//! 结果写入服务 - 业务能力层
//!
//! 把单行结果编码为 Parquet（仅在内存中），再整体写入对象存储

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::{debug, info};

use crate::error::UploadError;
use crate::models::{InvocationResult, StoredObjectKey};
use crate::storage::ObjectStore;

/// 上传对象的内容类型
pub const CONTENT_TYPE: &str = "application/octet-stream";

/// 结果写入服务
///
/// 编码或上传失败原样返回，不做额外重试（重试由存储客户端负责）。
pub struct ResultWriter<'a, O: ?Sized> {
    store: &'a O,
}

impl<'a, O: ObjectStore + ?Sized> ResultWriter<'a, O> {
    pub fn new(store: &'a O) -> Self {
        Self { store }
    }

    /// 编码并上传一条结果
    pub async fn write(
        &self,
        result: &InvocationResult,
        bucket: &str,
        key: &StoredObjectKey,
    ) -> Result<(), UploadError> {
        let body = encode_parquet(result)?;
        debug!("Parquet 编码完成: {} 字节", body.len());

        self.store
            .put_object(bucket, key.as_str(), body, CONTENT_TYPE)
            .await?;

        info!("📤 结果已保存: {}/{}", bucket, key);
        Ok(())
    }
}

/// 将结果编码为单行 Parquet
///
/// 列为 `url` 加上 `text` 或 `error` 其中之一。
pub fn encode_parquet(result: &InvocationResult) -> Result<Vec<u8>, UploadError> {
    let mut fields = vec![Field::new("url", DataType::Utf8, false)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(vec![result.url()]))];

    for (name, value) in [("text", result.text()), ("error", result.error())] {
        if let Some(value) = value {
            fields.push(Field::new(name, DataType::Utf8, true));
            columns.push(Arc::new(StringArray::from(vec![value])));
        }
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(buffer)
}
