//! # Idea Evaluation
//!
//! 研究创意的多维度评分、排序，以及方法论 / 实验设置的完善检查
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有共享状态，只暴露能力
//! - `SessionStore` - 会话内唯一的可变存储（评估结果、检查缓冲、当前轮次）
//! - `SimulatedLatency` - 可关闭的模拟延迟钩子
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Idea
//! - `CriteriaScorer` - 五维加权评分
//! - `RefinementChecker` - 方法论 / 实验设置规则检查
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一批创意"的处理流程
//! - `rank_ideas` - 评分 → 稳定排序 → 截取 top_k
//! - `ReportGenerator` - 评估报告
//! - `RoundController` - 检查轮次状态机与结论汇总
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/router` - 操作名到处理函数的路由
//! - `orchestrator/batch_processor` - 批量创意处理器（命令行入口）
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{SessionStore, SimulatedLatency};
pub use models::{CheckedIdea, Evaluation, Idea, Review, RoundVerdict, ScoredIdea};
pub use orchestrator::{App, CommandRouter};
pub use services::{CriteriaScorer, RefinementChecker};
pub use workflow::{rank_ideas, ReportGenerator, RoundController};
