use serde::{Deserialize, Serialize};

/// 一条词汇记录
///
/// 由数据源（内置样本 / TSV / TOML）提供，加载后只读。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRecord {
    pub word: String,
    /// 品词全称（noun / verb / adjective ...）
    pub part_of_speech: String,
    pub korean_definition: String,
    #[serde(default)]
    pub english_definition: String,
    #[serde(default)]
    pub example_sentence: String,
    /// 原始格式："同义词1, 同义词2 / 反义词1, 反义词2"
    #[serde(default)]
    pub synonyms_antonyms_raw: String,
    #[serde(default)]
    pub cefr_level: String,
    /// 学年范围描述，例如 "초3-초6"、"중2"、"고등"
    #[serde(default)]
    pub grade_range_descriptor: String,
}

/// 同义词/反义词字段中被视为"空"的占位符
const PLACEHOLDER_TOKENS: [&str; 4] = ["-", "none", "null", "n/a"];

impl VocabularyRecord {
    /// 同义词列表（`/` 左侧）
    pub fn synonyms(&self) -> Vec<String> {
        Self::split_related(self.synonyms_antonyms_raw.split('/').next())
    }

    /// 反义词列表（`/` 右侧）
    pub fn antonyms(&self) -> Vec<String> {
        Self::split_related(self.synonyms_antonyms_raw.split('/').nth(1))
    }

    fn split_related(half: Option<&str>) -> Vec<String> {
        let Some(half) = half else {
            return Vec::new();
        };

        strip_parenthesized(half)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|s| {
                let lower = s.to_lowercase();
                !PLACEHOLDER_TOKENS.contains(&lower.as_str())
            })
            .map(str::to_string)
            .collect()
    }
}

/// 去掉括号注释，例如 "big (size), large" → "big , large"
fn strip_parenthesized(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: &str) -> VocabularyRecord {
        VocabularyRecord {
            word: "big".to_string(),
            part_of_speech: "adjective".to_string(),
            korean_definition: "큰".to_string(),
            english_definition: String::new(),
            example_sentence: String::new(),
            synonyms_antonyms_raw: raw.to_string(),
            cefr_level: "A1".to_string(),
            grade_range_descriptor: String::new(),
        }
    }

    #[test]
    fn test_split_synonyms_and_antonyms() {
        let r = record("large, huge / small, little");
        assert_eq!(r.synonyms(), vec!["large", "huge"]);
        assert_eq!(r.antonyms(), vec!["small", "little"]);
    }

    #[test]
    fn test_placeholders_are_dropped() {
        let r = record("- / None");
        assert!(r.synonyms().is_empty());
        assert!(r.antonyms().is_empty());

        let r = record("NULL, large / -");
        assert_eq!(r.synonyms(), vec!["large"]);
        assert!(r.antonyms().is_empty());
    }

    #[test]
    fn test_parenthesized_notes_removed() {
        let r = record("large (size), huge / small");
        assert_eq!(r.synonyms(), vec!["large", "huge"]);
    }

    #[test]
    fn test_missing_antonym_half() {
        let r = record("large");
        assert_eq!(r.synonyms(), vec!["large"]);
        assert!(r.antonyms().is_empty());
    }
}
