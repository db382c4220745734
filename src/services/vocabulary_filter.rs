//! 词汇过滤 - 业务能力层
//!
//! 按检索条件依次过滤词库，未设置的条件直接跳过。结果为空不是错误，
//! 由上层决定如何兜底。

use crate::models::criteria::SearchCriteria;
use crate::models::vocabulary::VocabularyRecord;
use crate::services::grade_matcher;
use tracing::debug;

/// 按条件过滤词库，保持原有顺序
///
/// 过滤顺序：CEFR → 学年范围 → 品词 → 排除词 → 难度
pub fn filter<'a>(
    criteria: &SearchCriteria,
    pool: &'a [VocabularyRecord],
) -> Vec<&'a VocabularyRecord> {
    let mut filtered: Vec<&VocabularyRecord> = pool.iter().collect();
    debug!("过滤开始: {} 个词汇", filtered.len());

    if let Some(level) = criteria.cefr_level {
        filtered.retain(|v| level.matches(&v.cefr_level));
        debug!("CEFR {} → {} 个", level, filtered.len());
    }

    if let Some(grade) = criteria.grade_level.as_deref() {
        filtered.retain(|v| grade_matcher::matches(grade, &v.grade_range_descriptor));
        debug!("学年 {} → {} 个", grade, filtered.len());
    }

    if !criteria.parts_of_speech.is_empty() {
        filtered.retain(|v| {
            criteria
                .parts_of_speech
                .iter()
                .any(|pos| pos.as_str() == v.part_of_speech)
        });
        debug!("品词 {:?} → {} 个", criteria.parts_of_speech, filtered.len());
    }

    if !criteria.exclude_words.is_empty() {
        let excluded: Vec<String> = criteria
            .exclude_words
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        filtered.retain(|v| !excluded.contains(&v.word.to_lowercase()));
        debug!("排除词 {:?} → {} 个", excluded, filtered.len());
    }

    if let Some(difficulty) = criteria.difficulty {
        let allowed = difficulty.allowed_levels();
        filtered.retain(|v| allowed.iter().any(|level| level.matches(&v.cefr_level)));
        debug!("难度 {:?} → {} 个", difficulty, filtered.len());
    }

    filtered
}
