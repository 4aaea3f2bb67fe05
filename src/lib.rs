//! # Wellbeing Scraper
//!
//! 一次性的页面内容提取程序：启动无头浏览器，打开固定页面，
//! 提取内容区域的段落文本，并把结果（文本或错误）以 Parquet 写入对象存储。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 浏览器进程生命周期（启动、等待、关闭）
//! - `storage/` - 对象存储客户端
//! - `infrastructure/` - `JsExecutor`（唯一的 page owner）、时钟
//!
//! ### ② 业务能力层（Services）
//! - `ResourcePreflight` - 磁盘空间预检
//! - `extract_content` - 段落文本提取
//! - `ResultWriter` - Parquet 编码与上传
//!
//! ### ③ 流程层（Workflow）
//! - `StageOutcome` - 区分可恢复与致命的阶段结果
//!
//! ### ④ 编排层（Orchestration）
//! - `ExtractionPipeline` - 串联所有阶段，保证浏览器只关闭一次
//! - `handle_invocation` - 转换为 200 / 500 响应
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod storage;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{InvocationResult, StoredObjectKey};
pub use orchestrator::{build_pipeline, handle_invocation, ExtractionPipeline, InvocationResponse};
pub use workflow::StageOutcome;
