use crate::error::{AppError, AppResult, DatasetError};
use crate::models::exam::ExamQuestion;
use crate::models::vocabulary::VocabularyRecord;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 词汇文件结构：
///
/// ```toml
/// [[words]]
/// word = "apple"
/// partOfSpeech = "noun"
/// koreanDefinition = "사과"
/// ```
#[derive(Debug, Deserialize)]
struct VocabularyDocument {
    #[serde(default)]
    words: Vec<VocabularyRecord>,
}

/// TOML 真题文件结构（`[[questions]]`）
#[derive(Debug, Deserialize)]
struct ExamDocument {
    #[serde(default)]
    questions: Vec<ExamQuestion>,
}

/// 解析 TOML 文本为词汇列表
pub fn parse_vocabulary_toml(content: &str) -> Result<Vec<VocabularyRecord>, toml::de::Error> {
    let doc: VocabularyDocument = toml::from_str(content)?;
    Ok(doc.words)
}

/// 解析 TOML 文本为真题列表
pub fn parse_exam_toml(content: &str) -> Result<Vec<ExamQuestion>, toml::de::Error> {
    let doc: ExamDocument = toml::from_str(content)?;
    Ok(doc.questions)
}

/// 从 TOML 文件加载词汇
pub async fn load_vocabulary_toml(path: &Path) -> AppResult<Vec<VocabularyRecord>> {
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(DatasetError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::dataset_read_failed(&path_str, e))?;

    let words = parse_vocabulary_toml(&content).map_err(|source| DatasetError::TomlParseFailed {
        path: path_str.clone(),
        source,
    })?;

    tracing::info!("成功加载 {} 个词汇: {}", words.len(), path_str);
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vocabulary_toml() {
        let content = r#"
[[words]]
word = "apple"
partOfSpeech = "noun"
koreanDefinition = "사과"
englishDefinition = "a round fruit"
exampleSentence = "I ate an apple."
synonymsAntonymsRaw = "- / -"
cefrLevel = "A1"
gradeRangeDescriptor = "초3-초6"

[[words]]
word = "run"
partOfSpeech = "verb"
koreanDefinition = "달리다"
"#;
        let words = parse_vocabulary_toml(content).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].grade_range_descriptor, "초3-초6");
        assert_eq!(words[1].cefr_level, "");
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_vocabulary_toml("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_document() {
        assert!(parse_vocabulary_toml("[[words]]\nword = ").is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let err = load_vocabulary_toml(Path::new("no/such/vocabulary.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Dataset(DatasetError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("vocab_quiz_words_{}.toml", std::process::id()));
        let content = "[[words]]\nword = \"river\"\npartOfSpeech = \"noun\"\nkoreanDefinition = \"강\"\n";
        tokio::fs::write(&path, content).await.unwrap();

        let result = load_vocabulary_toml(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();

        let words = result.unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "river");
    }
}
