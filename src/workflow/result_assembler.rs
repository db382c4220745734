//! 批量出题流程 - 流程层
//!
//! 核心职责：决定"一批题目"用哪些词条来出
//!
//! 流程顺序：
//! 1. 按条件过滤词库
//! 2. 过滤结果为空 → 从整个词库随机抽取（附带提示）
//! 3. 过滤结果不足 → 全部使用（附带提示）
//! 4. 否则打乱后取前 N 个
//!
//! 干扰项始终从整个词库中抽取，而不是过滤后的子集。

use crate::models::criteria::SearchCriteria;
use crate::models::problem::GeneratedProblem;
use crate::models::vocabulary::VocabularyRecord;
use crate::services::vocabulary_filter;
use crate::workflow::problem_ctx::ProblemCtx;
use crate::workflow::problem_generator::generate_problem;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// 一批题目的生成结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub problems: Vec<GeneratedProblem>,
    /// 过滤后匹配的词条数（兜底时为 0）
    pub filtered_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// 是否使用了整个词库兜底
    pub used_fallback: bool,
}

/// 按条件生成一批题目
pub fn generate<R: Rng + ?Sized>(
    criteria: &SearchCriteria,
    pool: &[VocabularyRecord],
    rng: &mut R,
) -> GenerationOutcome {
    let item_count = criteria.effective_item_count();
    let filtered = vocabulary_filter::filter(criteria, pool);
    let filtered_count = filtered.len();

    let (mut selected, warning, used_fallback) = if filtered.is_empty() {
        let mut all: Vec<&VocabularyRecord> = pool.iter().collect();
        all.shuffle(rng);
        all.truncate(item_count);

        let message = if all.is_empty() {
            "어휘 데이터가 비어 있어 문제를 생성하지 못했습니다.".to_string()
        } else {
            format!(
                "조건에 맞는 어휘가 없어 전체 어휘에서 무작위로 {}개를 선택했습니다.",
                all.len()
            )
        };
        warn!("⚠️ 没有符合条件的词汇，从整个词库 ({} 个) 中随机抽取", pool.len());
        (all, Some(message), true)
    } else if filtered_count < item_count {
        warn!("⚠️ 符合条件的词汇不足: {}/{}", filtered_count, item_count);
        let message = format!(
            "조건에 맞는 어휘가 {}개뿐이라 요청한 {}개 중 {}개만 생성했습니다.",
            filtered_count, item_count, filtered_count
        );
        (filtered, Some(message), false)
    } else {
        (filtered, None, false)
    };

    selected.shuffle(rng);
    selected.truncate(item_count);

    let batch_tag = ProblemCtx::new_batch_tag(rng);
    let problems: Vec<GeneratedProblem> = selected
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let ctx = ProblemCtx::new(batch_tag, index);
            let problem = generate_problem(criteria.problem_type, record, pool, &ctx, rng);
            debug!("{} {}", ctx, problem);
            problem
        })
        .collect();

    debug!(
        "生成完成: {} 题 (匹配 {} 个, 兜底 {})",
        problems.len(),
        filtered_count,
        used_fallback
    );

    GenerationOutcome {
        problems,
        filtered_count,
        warning,
        used_fallback,
    }
}
