use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 单次请求允许的题目数量范围
pub const MIN_ITEM_COUNT: usize = 1;
pub const MAX_ITEM_COUNT: usize = 100;
pub const DEFAULT_ITEM_COUNT: usize = 10;

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProblemType {
    /// 单词 → 韩语释义
    #[default]
    #[serde(rename = "객관식")]
    MultipleChoice,
    /// 例句挖空
    #[serde(rename = "빈칸채우기")]
    FillInBlank,
    /// 英英释义 → 单词
    #[serde(rename = "영영풀이")]
    EnglishDefinition,
    #[serde(rename = "동의어")]
    Synonym,
    #[serde(rename = "반의어")]
    Antonym,
    /// 看释义和提示选正确拼写
    #[serde(rename = "철자맞추기")]
    Spelling,
}

impl ProblemType {
    pub const ALL: [ProblemType; 6] = [
        ProblemType::MultipleChoice,
        ProblemType::FillInBlank,
        ProblemType::EnglishDefinition,
        ProblemType::Synonym,
        ProblemType::Antonym,
        ProblemType::Spelling,
    ];

    /// 获取韩语名称（与对外 JSON 一致）
    pub fn name(self) -> &'static str {
        match self {
            ProblemType::MultipleChoice => "객관식",
            ProblemType::FillInBlank => "빈칸채우기",
            ProblemType::EnglishDefinition => "영영풀이",
            ProblemType::Synonym => "동의어",
            ProblemType::Antonym => "반의어",
            ProblemType::Spelling => "철자맞추기",
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 可识别的品词
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
}

impl PartOfSpeech {
    /// 与数据集中 `part_of_speech` 字段一致的名称
    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
        }
    }
}

/// CEFR 等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    /// 从字符串解析（忽略大小写和首尾空白）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Some(CefrLevel::A1),
            "A2" => Some(CefrLevel::A2),
            "B1" => Some(CefrLevel::B1),
            "B2" => Some(CefrLevel::B2),
            "C1" => Some(CefrLevel::C1),
            "C2" => Some(CefrLevel::C2),
            _ => None,
        }
    }

    /// 判断数据集中的 CEFR 字符串是否等于该等级
    pub fn matches(self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "쉬움")]
    Easy,
    #[serde(rename = "보통")]
    Medium,
    #[serde(rename = "어려움")]
    Hard,
}

impl Difficulty {
    /// 难度对应的 CEFR 等级集合
    pub fn allowed_levels(self) -> &'static [CefrLevel] {
        match self {
            Difficulty::Easy => &[CefrLevel::A1],
            Difficulty::Medium => &[CefrLevel::A2],
            Difficulty::Hard => &[CefrLevel::B1, CefrLevel::B2, CefrLevel::C1, CefrLevel::C2],
        }
    }
}

/// 从自然语言中提取出的检索条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// 规范化的学年，例如 "초등5"、"중2"、"고1"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cefr_level: Option<CefrLevel>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub parts_of_speech: BTreeSet<PartOfSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub problem_type: ProblemType,
    #[serde(default = "default_item_count")]
    pub item_count: usize,
    /// 排除词（两轮提取之间允许重复）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_words: Vec<String>,
}

fn default_item_count() -> usize {
    DEFAULT_ITEM_COUNT
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            grade_level: None,
            cefr_level: None,
            parts_of_speech: BTreeSet::new(),
            difficulty: None,
            problem_type: ProblemType::default(),
            item_count: DEFAULT_ITEM_COUNT,
            exclude_words: Vec::new(),
        }
    }
}

impl SearchCriteria {
    /// 将题目数量限制在 [1, 100]
    pub fn clamp_item_count(count: usize) -> usize {
        count.clamp(MIN_ITEM_COUNT, MAX_ITEM_COUNT)
    }

    /// 实际生效的题目数量
    pub fn effective_item_count(&self) -> usize {
        Self::clamp_item_count(self.item_count)
    }

    pub fn with_item_count(mut self, count: usize) -> Self {
        self.item_count = Self::clamp_item_count(count);
        self
    }
}
