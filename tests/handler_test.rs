use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use wellbeing_scraper::browser::{BrowserLauncher, BrowserSession};
use wellbeing_scraper::config::BrowserSettings;
use wellbeing_scraper::error::{BrowserError, ConfigError, ResourceError};
use wellbeing_scraper::infrastructure::FixedClock;
use wellbeing_scraper::services::DiskProbe;
use wellbeing_scraper::{build_pipeline, logger, AppError};

/// 任何启动尝试都视为测试失败
struct UntouchableLauncher;

#[async_trait]
impl BrowserLauncher for UntouchableLauncher {
    type Session = UntouchableSession;

    async fn launch(&self, _settings: &BrowserSettings) -> Result<UntouchableSession, BrowserError> {
        panic!("配置无效时不应启动浏览器");
    }
}

struct UntouchableSession;

#[async_trait]
impl BrowserSession for UntouchableSession {
    async fn navigate(&self, _url: &str) -> Result<(), BrowserError> {
        unreachable!()
    }

    async fn ready_state(&self) -> Result<String, BrowserError> {
        unreachable!()
    }

    async fn paragraph_texts(
        &self,
        _container_selector: &str,
        _paragraph_selector: &str,
    ) -> Result<Option<Vec<String>>, BrowserError> {
        unreachable!()
    }

    async fn terminate(self) {}
}

/// 任何磁盘查询都视为测试失败
struct UntouchableDisk;

impl DiskProbe for UntouchableDisk {
    fn available_bytes(&self, _path: &Path) -> Result<u64, ResourceError> {
        panic!("配置无效时不应查询磁盘");
    }
}

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

async fn missing_var(pairs: &[(&str, &str)]) -> String {
    let result =
        build_pipeline(env(pairs), UntouchableLauncher, UntouchableDisk, FixedClock(0)).await;

    match result {
        Err(AppError::Config(ConfigError::MissingEnvVar { var_name })) => var_name,
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("缺少必需变量时不应构造成功"),
    }
}

#[tokio::test]
async fn test_missing_region_fails_before_browser_or_disk() {
    logger::init();
    assert_eq!(missing_var(&[("BUCKET_NAME", "results")]).await, "REGION_NAME");
}

#[tokio::test]
async fn test_missing_bucket_fails_before_browser_or_disk() {
    logger::init();
    assert_eq!(missing_var(&[("REGION_NAME", "eu-west-1")]).await, "BUCKET_NAME");
}

#[tokio::test]
async fn test_missing_both_reports_region_first() {
    logger::init();
    assert_eq!(missing_var(&[]).await, "REGION_NAME");
}

#[tokio::test]
async fn test_blank_bucket_counts_as_missing() {
    logger::init();
    assert_eq!(
        missing_var(&[("REGION_NAME", "eu-west-1"), ("BUCKET_NAME", "  ")]).await,
        "BUCKET_NAME"
    );
}

#[tokio::test]
async fn test_valid_config_builds_without_touching_browser_or_disk() {
    logger::init();

    let result = build_pipeline(
        env(&[("REGION_NAME", "eu-west-1"), ("BUCKET_NAME", "results")]),
        UntouchableLauncher,
        UntouchableDisk,
        FixedClock(0),
    )
    .await;

    assert!(result.is_ok());
}
