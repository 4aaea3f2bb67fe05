//! 测试用的内存替身：浏览器、对象存储、磁盘

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use wellbeing_scraper::browser::{BrowserLauncher, BrowserSession};
use wellbeing_scraper::config::{BrowserSettings, Config};
use wellbeing_scraper::error::{BrowserError, ResourceError, UploadError};
use wellbeing_scraper::services::DiskProbe;
use wellbeing_scraper::storage::ObjectStore;

pub const MB: u64 = 1024 * 1024;

/// 测试配置：超时为 0 秒，轮询间隔 1 毫秒
pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = [
        ("REGION_NAME", "eu-west-1"),
        ("BUCKET_NAME", "results"),
        ("READY_TIMEOUT_SECS", "0"),
        ("READY_POLL_INTERVAL_MS", "1"),
    ]
    .into_iter()
    .collect();
    Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).expect("测试配置无效")
}

/// 模拟页面行为
#[derive(Clone, Debug)]
pub struct PageScript {
    pub navigation_error: Option<String>,
    pub ready_state: String,
    pub paragraphs: Result<Option<Vec<String>>, ScriptFailure>,
}

#[derive(Clone, Copy, Debug)]
pub enum ScriptFailure {
    Exception,
    Disconnected,
}

impl PageScript {
    /// 立即就绪，内容区域包含给定段落
    pub fn with_paragraphs(paragraphs: &[&str]) -> Self {
        Self {
            navigation_error: None,
            ready_state: "complete".to_string(),
            paragraphs: Ok(Some(paragraphs.iter().map(|p| p.to_string()).collect())),
        }
    }

    /// 内容区域不存在
    pub fn without_region() -> Self {
        Self {
            paragraphs: Ok(None),
            ..Self::with_paragraphs(&[])
        }
    }

    /// 永远停在 loading
    pub fn never_ready() -> Self {
        Self {
            ready_state: "loading".to_string(),
            ..Self::with_paragraphs(&["never read"])
        }
    }
}

/// 浏览器启动/关闭计数
#[derive(Clone, Default, Debug)]
pub struct BrowserCounters {
    pub launches: Arc<AtomicUsize>,
    pub terminations: Arc<AtomicUsize>,
    pub navigations: Arc<Mutex<Vec<String>>>,
}

impl BrowserCounters {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn terminations(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }
}

pub struct MockLauncher {
    pub script: PageScript,
    pub fail_launch: bool,
    pub counters: BrowserCounters,
}

impl MockLauncher {
    pub fn new(script: PageScript) -> Self {
        Self {
            script,
            fail_launch: false,
            counters: BrowserCounters::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(PageScript::without_region())
        }
    }
}

#[async_trait]
impl BrowserLauncher for MockLauncher {
    type Session = MockSession;

    async fn launch(&self, _settings: &BrowserSettings) -> Result<MockSession, BrowserError> {
        if self.fail_launch {
            return Err(BrowserError::LaunchFailed {
                reason: "chrome not found".to_string(),
            });
        }
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        Ok(MockSession {
            script: self.script.clone(),
            counters: self.counters.clone(),
        })
    }
}

pub struct MockSession {
    script: PageScript,
    counters: BrowserCounters,
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.counters
            .navigations
            .lock()
            .unwrap()
            .push(url.to_string());
        match &self.script.navigation_error {
            Some(reason) => Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn ready_state(&self) -> Result<String, BrowserError> {
        Ok(self.script.ready_state.clone())
    }

    async fn paragraph_texts(
        &self,
        _container_selector: &str,
        _paragraph_selector: &str,
    ) -> Result<Option<Vec<String>>, BrowserError> {
        match &self.script.paragraphs {
            Ok(paragraphs) => Ok(paragraphs.clone()),
            Err(ScriptFailure::Exception) => Err(BrowserError::script_failed(
                std::io::Error::new(std::io::ErrorKind::Other, "TypeError: root is null"),
            )),
            Err(ScriptFailure::Disconnected) => Err(BrowserError::Disconnected),
        }
    }

    async fn terminate(self) {
        self.counters.terminations.fetch_add(1, Ordering::SeqCst);
    }
}

/// 内存对象存储
#[derive(Default)]
pub struct MemoryStore {
    pub fail: bool,
    pub objects: Arc<Mutex<Vec<StoredObject>>>,
}

#[derive(Clone, Debug)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        "results"
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), UploadError> {
        if self.fail {
            return Err(UploadError::Put {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "read timeout",
                )),
            });
        }
        self.objects.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            body,
        });
        Ok(())
    }
}

/// 固定可用空间的磁盘
pub struct FixedDisk(pub u64);

impl DiskProbe for FixedDisk {
    fn available_bytes(&self, _path: &Path) -> Result<u64, ResourceError> {
        Ok(self.0)
    }
}

/// 解码存储的 Parquet，返回 列名 → 值
pub fn decode_row(body: &[u8]) -> HashMap<String, String> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes::Bytes::copy_from_slice(body))
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    assert_eq!(batch.num_rows(), 1);

    let schema = batch.schema();
    schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let column = batch.column(i);
            let strings = column.as_any().downcast_ref::<StringArray>().unwrap();
            (field.name().clone(), strings.value(0).to_string())
        })
        .collect()
}
