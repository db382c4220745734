//! # Vocab Quiz Gen
//!
//! 根据自然语言请求生成英语词汇题目的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有唯一的可变资源：随机源
//! - `QuizRng` - 可注入的随机源，支持固定种子
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个文件一种能力
//! - `query_interpreter` - 自然语言 → 检索条件
//! - `grade_matcher` - 学年范围匹配
//! - `vocabulary_filter` - 按条件过滤词库
//! - `distractor` - 干扰项抽取
//! - `exam_search` - 历年真题检索
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"和"一批题"的生成流程
//! - `ProblemCtx` - 上下文封装（batch_tag + index）
//! - `problem_generator` - 六种题型
//! - `result_assembler` - 批量选词与兜底策略
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/request_handler` - 校验、超时、响应整形
//! - `orchestrator/app` - 配置 → 词库 → 请求 → JSON 输出
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::QuizRng;
pub use models::{
    DataSource, Dataset, GeneratedProblem, ProblemType, SearchCriteria, VocabularyRecord,
};
pub use orchestrator::{App, Command, GenerateResponse, RequestHandler};
pub use workflow::{GenerationOutcome, ProblemCtx};
