use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// 默认目标页面
pub const DEFAULT_TARGET_URL: &str = "https://en.wikipedia.org/wiki/Well-being";
/// 内容区域选择器
pub const CONTENT_SELECTOR: &str = "#bodyContent";
/// 段落选择器
pub const PARAGRAPH_SELECTOR: &str = "p";

/// 程序配置
///
/// 由 [`Config::from_env`] 一次性构建并校验，缺少必需字段时直接失败，
/// 不会在后续流程中再去读取环境变量。
#[derive(Clone, Debug)]
pub struct Config {
    // --- 对象存储 ---
    /// 存储区域 (REGION_NAME)
    pub region_name: String,
    /// 目标存储桶 (BUCKET_NAME)
    pub bucket_name: String,
    /// 对象键前缀
    pub object_key_prefix: String,
    // --- 页面 ---
    /// 目标URL
    pub target_url: String,
    /// 等待 document.readyState 的超时时间
    pub ready_timeout: Duration,
    /// 轮询间隔
    pub ready_poll_interval: Duration,
    // --- 资源 ---
    /// 临时目录（浏览器用户数据、日志）
    pub scratch_dir: PathBuf,
    /// 启动浏览器前要求的最小可用空间 (MB)
    pub min_free_disk_mb: u64,
    // --- 浏览器 ---
    /// Chrome 可执行文件路径
    pub chrome_executable: PathBuf,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
}

impl Config {
    /// 从进程环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region_name = required(&lookup, "REGION_NAME")?;
        let bucket_name = required(&lookup, "BUCKET_NAME")?;

        Ok(Self {
            region_name,
            bucket_name,
            object_key_prefix: lookup("OBJECT_KEY_PREFIX")
                .unwrap_or_else(|| "wellbeing_page_content".to_string()),
            target_url: lookup("TARGET_URL").unwrap_or_else(|| DEFAULT_TARGET_URL.to_string()),
            ready_timeout: Duration::from_secs(parsed(&lookup, "READY_TIMEOUT_SECS", 30)?),
            ready_poll_interval: Duration::from_millis(parsed(
                &lookup,
                "READY_POLL_INTERVAL_MS",
                500,
            )?),
            scratch_dir: lookup("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/tmp")),
            min_free_disk_mb: parsed(&lookup, "MIN_FREE_DISK_MB", 500)?,
            chrome_executable: lookup("CHROME_EXECUTABLE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/opt/chrome/chrome")),
            browser_debug_port: parsed(&lookup, "BROWSER_DEBUG_PORT", 9222)?,
        })
    }

    /// 存储客户端设置
    pub fn storage_settings(&self) -> StorageSettings {
        StorageSettings {
            region_name: self.region_name.clone(),
            bucket_name: self.bucket_name.clone(),
            ..StorageSettings::default()
        }
    }

    /// 浏览器启动设置
    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            chrome_executable: self.chrome_executable.clone(),
            debug_port: self.browser_debug_port,
            user_data_dir: self.scratch_dir.join("chromium-user-data"),
            log_file: self.scratch_dir.join("chromium.log"),
            request_timeout: self.ready_timeout,
        }
    }
}

/// 对象存储客户端设置
#[derive(Clone, Debug)]
pub struct StorageSettings {
    pub region_name: String,
    pub bucket_name: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub max_attempts: u32,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            region_name: String::new(),
            bucket_name: String::new(),
            connect_timeout: Duration::from_secs(1),
            read_timeout: Duration::from_secs(1),
            max_attempts: 3,
        }
    }
}

/// 浏览器启动设置
#[derive(Clone, Debug)]
pub struct BrowserSettings {
    pub chrome_executable: PathBuf,
    pub debug_port: u16,
    pub user_data_dir: PathBuf,
    pub log_file: PathBuf,
    pub request_timeout: Duration,
}

impl BrowserSettings {
    /// 传给 Chrome 的命令行参数
    ///
    /// 无头、无沙盒、单进程；关闭 GPU、扩展、后台网络和同步。
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args: Vec<String> = [
            "--no-sandbox",
            "--disable-setuid-sandbox",
            "--disable-dev-shm-usage",
            "--disable-gpu",
            "--disable-software-rasterizer",
            "--disable-extensions",
            "--disable-background-networking",
            "--disable-default-apps",
            "--disable-sync",
            "--disable-web-security",
            "--disable-features=VizDisplayCompositor",
            "--single-process",
            "--no-first-run",
            "--ignore-certificate-errors",
            "--start-maximized",
            "--enable-logging",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push(format!("--log-file={}", self.log_file.display()));
        args
    }
}

fn required<F>(lookup: &F, var_name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar {
            var_name: var_name.to_string(),
        }),
    }
}

fn parsed<F, T>(lookup: &F, var_name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var_name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            var_name: var_name.to_string(),
            value,
            expected_type: std::any::type_name::<T>().to_string(),
        }),
    }
}
