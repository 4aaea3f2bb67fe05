//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `handler` - 调用入口
//! - 从环境加载配置、构造存储客户端
//! - 把流水线结果转换为 200 / 500 响应
//!
//! ### `pipeline` - 提取流水线
//! - 预检 → 启动浏览器 → 导航 → 等待 → 提取 → 打包 → 上传 → 关闭
//! - 唯一持有浏览器会话的模块
//!
//! ## 层次关系
//!
//! ```text
//! handler
//!     ↓
//! pipeline (ExtractionPipeline)
//!     ↓
//! services (preflight / extractor / result_writer)
//!     ↓
//! browser / storage / infrastructure
//! ```

pub mod handler;
pub mod pipeline;

pub use handler::{build_pipeline, handle_invocation, InvocationResponse};
pub use pipeline::ExtractionPipeline;
