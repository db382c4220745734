//! 请求处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **输入校验**：拒绝空文本和超长文本，核心流程从不报错
//! 2. **调度**：条件提取 → 批量出题，放在阻塞线程上执行
//! 3. **超时**：整个请求受 `request_timeout_secs` 限制
//! 4. **响应整形**：条件、题目、提示、匹配数、词库来源
//!
//! 每个请求使用独立的随机源，词库以 `Arc` 只读共享。

use crate::config::Config;
use crate::error::{AppError, AppResult, ValidationError};
use crate::infrastructure::QuizRng;
use crate::models::criteria::SearchCriteria;
use crate::models::exam::{ExamQuestion, ExamSearchCriteria};
use crate::models::loaders::{DataSource, Dataset};
use crate::models::problem::GeneratedProblem;
use crate::services::{exam_search, query_interpreter};
use crate::utils::logging;
use crate::workflow::result_assembler;
use chrono::Datelike;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 出题请求的响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub criteria: SearchCriteria,
    pub problems: Vec<GeneratedProblem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub filtered_count: usize,
    pub data_source: DataSource,
}

/// 真题检索的响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSearchResponse {
    pub criteria: ExamSearchCriteria,
    pub results: Vec<ExamQuestion>,
    pub count: usize,
}

/// 请求处理器
#[derive(Clone)]
pub struct RequestHandler {
    dataset: Arc<Dataset>,
    exam_bank: Arc<Vec<ExamQuestion>>,
    config: Config,
}

impl RequestHandler {
    pub fn new(dataset: Dataset, exam_bank: Vec<ExamQuestion>, config: Config) -> Self {
        Self {
            dataset: Arc::new(dataset),
            exam_bank: Arc::new(exam_bank),
            config,
        }
    }

    /// 校验请求文本：不能为空白，长度（按字符计）不能超过上限
    pub fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        let len = input.chars().count();
        if len > self.config.max_input_chars {
            return Err(ValidationError::TooLong {
                len,
                max: self.config.max_input_chars,
            });
        }
        Ok(())
    }

    /// 处理一次出题请求
    pub async fn generate(&self, input: &str) -> AppResult<GenerateResponse> {
        self.validate(input)?;
        logging::log_request_start(input);

        let dataset = Arc::clone(&self.dataset);
        let text = input.to_string();
        let seed = self.config.rng_seed;

        let task = tokio::task::spawn_blocking(move || {
            let criteria = query_interpreter::interpret(&text);
            let mut rng = QuizRng::from_seed_option(seed);
            let outcome = result_assembler::generate(&criteria, &dataset.records, &mut rng);
            (criteria, outcome)
        });

        // 超时只放弃等待，阻塞任务本身无法取消，会在后台跑完
        let secs = self.config.request_timeout_secs;
        let (criteria, outcome) = tokio::time::timeout(Duration::from_secs(secs), task)
            .await
            .map_err(|_| AppError::Timeout { secs })?
            .map_err(|e| AppError::Task(e.to_string()))?;

        logging::log_generation_complete(
            outcome.problems.len(),
            criteria.effective_item_count(),
            outcome.filtered_count,
        );
        if let Some(warning) = &outcome.warning {
            info!("💡 {}", warning);
        }

        Ok(GenerateResponse {
            criteria,
            problems: outcome.problems,
            warning: outcome.warning,
            filtered_count: outcome.filtered_count,
            data_source: self.dataset.source,
        })
    }

    /// 处理一次真题检索请求，相对年份按本地当前年份解析
    pub async fn search_exams(&self, input: &str) -> AppResult<ExamSearchResponse> {
        let current_year = chrono::Local::now().year();
        self.search_exams_in_year(input, current_year)
    }

    /// 以指定的"今年"处理真题检索
    pub fn search_exams_in_year(
        &self,
        input: &str,
        current_year: i32,
    ) -> AppResult<ExamSearchResponse> {
        self.validate(input)?;
        logging::log_request_start(input);

        let criteria = exam_search::parse_exam_query(input, current_year);
        let results: Vec<ExamQuestion> = exam_search::filter_exam_questions(&criteria, &self.exam_bank)
            .into_iter()
            .cloned()
            .collect();
        debug!("真题检索结果: {} 道", results.len());
        info!("✅ 检索完成: {} 道真题", results.len());

        Ok(ExamSearchResponse {
            count: results.len(),
            criteria,
            results,
        })
    }
}
