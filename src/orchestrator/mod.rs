//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责请求调度和应用生命周期，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用外壳
//! - 管理应用生命周期（初始化、运行）
//! - 加载词库和真题库
//! - 解析命令行请求，输出 JSON
//!
//! ### `request_handler` - 请求处理器
//! - 校验输入（空文本、超长文本）
//! - 在阻塞线程上运行核心流程，并施加超时
//! - 整形响应（条件、题目、提示、匹配数、词库来源）
//!
//! ## 层次关系
//!
//! ```text
//! app (处理命令行 / stdin)
//!     ↓
//! request_handler (处理单个请求)
//!     ↓
//! workflow::result_assembler (处理一批题目)
//!     ↓
//! workflow::problem_generator (处理单道题目)
//!     ↓
//! services (能力层：解析 / 过滤 / 干扰项 / 真题检索)
//!     ↓
//! infrastructure (基础设施：QuizRng)
//! ```

pub mod app;
pub mod request_handler;

// 重新导出主要类型
pub use app::{App, Command};
pub use request_handler::{ExamSearchResponse, GenerateResponse, RequestHandler};
