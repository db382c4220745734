use crate::models::criteria::ProblemType;
use serde::{Deserialize, Serialize};

/// 生成的题目
///
/// 值对象，生成后不再修改；展示层只读使用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProblem {
    /// 批次内唯一的标识
    pub id: String,
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    /// 出题所依据的单词
    #[serde(rename = "word")]
    pub source_word: String,
    #[serde(rename = "question")]
    pub question_text: String,
    /// 选项，主观题可为空
    pub choices: Vec<String>,
    pub correct_answer: String,
    #[serde(rename = "explanation")]
    pub explanation_text: String,
}

impl std::fmt::Display for GeneratedProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let preview = if self.question_text.chars().count() > 60 {
            self.question_text.chars().take(60).collect::<String>() + "..."
        } else {
            self.question_text.clone()
        };
        write!(f, "[{}] {} ({})", self.problem_type, preview.replace('\n', " "), self.source_word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(question: &str) -> GeneratedProblem {
        GeneratedProblem {
            id: "0000abcd-001".to_string(),
            problem_type: ProblemType::FillInBlank,
            source_word: "river".to_string(),
            question_text: question.to_string(),
            choices: vec!["river".to_string()],
            correct_answer: "river".to_string(),
            explanation_text: String::new(),
        }
    }

    #[test]
    fn test_display_preview() {
        let short = problem("빈칸에 알맞은 단어는?\nThe ________ is long.");
        assert_eq!(
            short.to_string(),
            "[빈칸채우기] 빈칸에 알맞은 단어는? The ________ is long. (river)"
        );

        let long = problem(&"a".repeat(80));
        let shown = long.to_string();
        assert!(shown.contains(&format!("{}...", "a".repeat(60))));
        assert!(!shown.contains(&"a".repeat(61)));
    }
}
