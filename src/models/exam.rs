use serde::{Deserialize, Serialize};

/// 历年真题的难度（상 / 중 / 하）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamDifficulty {
    #[serde(rename = "상")]
    High,
    #[serde(rename = "중")]
    Medium,
    #[serde(rename = "하")]
    Low,
}

/// 真题检索条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_month: Option<u32>,
    /// 수능 / 모의고사 / 학력평가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
    /// 빈칸추론 / 순서배열 ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<ExamDifficulty>,
}

impl ExamSearchCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 题库中的一道真题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    pub id: String,
    pub exam_type: String,
    pub exam_year: i32,
    pub exam_month: u32,
    pub question_number: u32,
    pub question_type: String,
    pub difficulty: ExamDifficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_rate: Option<u32>,
    pub passage: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}
