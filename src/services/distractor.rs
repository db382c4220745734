//! 干扰项抽取 - 业务能力层
//!
//! 从词库中为目标词抽取若干个互不相同、且不等于正确答案的干扰项。

use crate::models::vocabulary::VocabularyRecord;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// 干扰项取自词条的哪个字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistractorField {
    KoreanDefinition,
    Word,
}

impl DistractorField {
    pub fn value(self, record: &VocabularyRecord) -> &str {
        match self {
            DistractorField::KoreanDefinition => record.korean_definition.trim(),
            DistractorField::Word => record.word.trim(),
        }
    }
}

/// 抽取至多 `count` 个干扰项
///
/// - 排除目标词本身，以及字段值与目标相同或在 `excluded` 中的词条
/// - 同品词的候选足够 `count` 个时只从同品词中抽，否则从全部候选中抽
/// - 候选不足时返回少于 `count` 个，不报错
pub fn select_distractors<R: Rng + ?Sized>(
    target: &VocabularyRecord,
    pool: &[VocabularyRecord],
    count: usize,
    field: DistractorField,
    excluded: &[&str],
    rng: &mut R,
) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }

    let target_value = field.value(target);

    let eligible: Vec<&VocabularyRecord> = pool
        .iter()
        .filter(|v| !std::ptr::eq(*v, target) && v.word != target.word)
        .filter(|v| {
            let value = field.value(v);
            !value.is_empty() && value != target_value && !excluded.contains(&value)
        })
        .collect();

    let same_pos: Vec<&VocabularyRecord> = eligible
        .iter()
        .copied()
        .filter(|v| v.part_of_speech == target.part_of_speech)
        .collect();

    let same_pos_distinct = same_pos
        .iter()
        .map(|v| field.value(v))
        .collect::<HashSet<_>>()
        .len();

    let mut candidates = if same_pos_distinct >= count {
        same_pos
    } else {
        debug!(
            "同品词候选不足 ({}/{}), 使用全部候选: {}",
            same_pos_distinct,
            count,
            target.word
        );
        eligible
    };
    candidates.shuffle(rng);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut distractors = Vec::with_capacity(count);
    for record in candidates {
        let value = field.value(record);
        if seen.insert(value) {
            distractors.push(value.to_string());
            if distractors.len() == count {
                break;
            }
        }
    }

    distractors
}
