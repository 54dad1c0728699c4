//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责请求分发和批量调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `router` - 命令路由器
//! - 操作名 → 带类型的处理函数
//! - 空列表校验、错误转换为失败响应
//! - 产出同步响应和出站消息（`Dispatch`）
//!
//! ### `batch_processor` - 批量创意处理器
//! - 管理应用生命周期（初始化、运行、清理）
//! - 批量加载创意批次（Vec<IdeaBatch>）
//! - 写报告文件、投递出站消息
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<IdeaBatch>)
//!     ↓
//! router (处理单个请求)
//!     ↓
//! workflow (排序 / 报告 / 轮次控制，处理 Vec<Idea>)
//!     ↓
//! services (能力层：评分 / 完善检查，处理单个 Idea)
//!     ↓
//! infrastructure (基础设施：SessionStore / SimulatedLatency)
//! ```

pub mod batch_processor;
pub mod router;

// 重新导出主要类型
pub use batch_processor::{App, BatchResult};
pub use router::{CommandRouter, Operation};
