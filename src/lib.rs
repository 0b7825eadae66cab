//! # Crowd Rounds
//!
//! 一个用于众包标注二元关系（例如"视频展示了动作 X"）的多轮批次管理工具
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 批次、结果表、计票、最终标签
//! - `models/loaders` - 列表文件与 CSV 表格的读写
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只做一件事
//! - `BatchGenerator` - 补齐、洗牌、插入金标准
//! - `ResultFilter` - 按金标准拒绝提交并计票
//! - `RoundAdvancer` - 为被拒绝的提交生成下一轮
//! - `Aggregator` - 多数票得出最终标签和完成率
//! - `ReviewWriter` - 写 Approve / Reject 审核文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - `RoundCtx`：哪个目录的第几轮，以及每轮文件的命名
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/coordinator` - 轮次状态机，纯内存
//! - `orchestrator/app` - 一次操作员动作的完整执行
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Answer, Batch, FinalLabel, HitLayout, LabelReport, ResultTable, TallyStore};
pub use orchestrator::{Action, App, BatchCoordinator};
pub use workflow::RoundCtx;
