//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责轮次推进和文件调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `coordinator` - 批次协调器
//! - 持有条目、金标准池、计票表和轮次计数
//! - 生成 → 解析 → 推进 → 汇总，全部在内存中完成
//!
//! ### `app` - 应用入口
//! - 校验配置、加载列表
//! - 读写每轮的批次、结果、审核文件
//! - 输出运行日志和最终统计
//!
//! ## 层次关系
//!
//! ```text
//! app (读写文件)
//!     ↓
//! coordinator (轮次状态机)
//!     ↓
//! services (能力层：generate / filter / advance / aggregate / review)
//!     ↓
//! models (数据：Batch / ResultTable / TallyStore)
//! ```

pub mod app;
pub mod coordinator;

// 重新导出主要类型
pub use app::{Action, App, ReplaySummary};
pub use coordinator::BatchCoordinator;
