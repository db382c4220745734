use crate::error::{AppResult, DatasetError};
use crate::models::exam::ExamQuestion;
use crate::models::loaders::toml_loader::{parse_exam_toml, parse_vocabulary_toml};
use crate::models::vocabulary::VocabularyRecord;

const SAMPLE_VOCABULARY: &str = include_str!("../../../data/sample_vocabulary.toml");
const SAMPLE_EXAM_QUESTIONS: &str = include_str!("../../../data/exam_questions.toml");

/// 内置示例词库
pub fn sample_vocabulary() -> AppResult<Vec<VocabularyRecord>> {
    parse_vocabulary_toml(SAMPLE_VOCABULARY).map_err(|source| {
        DatasetError::TomlParseFailed {
            path: "data/sample_vocabulary.toml".to_string(),
            source,
        }
        .into()
    })
}

/// 内置真题样本
pub fn sample_exam_questions() -> AppResult<Vec<ExamQuestion>> {
    parse_exam_toml(SAMPLE_EXAM_QUESTIONS).map_err(|source| {
        DatasetError::TomlParseFailed {
            path: "data/exam_questions.toml".to_string(),
            source,
        }
        .into()
    })
}
