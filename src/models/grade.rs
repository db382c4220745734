use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// 学段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolStage {
    /// 초등학교
    Elementary,
    /// 중학교
    Middle,
    /// 고등학교
    High,
}

impl SchoolStage {
    /// 按首字识别学段："초"/"초등"/"초등학교" 视为同一学段，"중…"、"고…" 只看首字
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().chars().next()? {
            '초' => Some(SchoolStage::Elementary),
            '중' => Some(SchoolStage::Middle),
            '고' => Some(SchoolStage::High),
            _ => None,
        }
    }

    /// 规范化学年字符串使用的前缀
    pub fn prefix(self) -> &'static str {
        match self {
            SchoolStage::Elementary => "초등",
            SchoolStage::Middle => "중",
            SchoolStage::High => "고",
        }
    }

    /// 只有学段没有数字时的默认年级
    pub fn default_level(self) -> u8 {
        match self {
            SchoolStage::Elementary => 3,
            SchoolStage::Middle | SchoolStage::High => 1,
        }
    }
}

/// 学段关键字（长写法在前，保证整体匹配）
pub(crate) const STAGE_KEYWORD: &str = "초등학교|초등|초|중학교|중학|중등|중|고등학교|고등|고교|고";

static GRADE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({STAGE_KEYWORD})\s*(\d{{1,2}})\s*(?:학년)?$"))
        .expect("学年正则必须合法")
});

/// 学年标记，例如 "중2" → (Middle, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GradeToken {
    pub stage: SchoolStage,
    pub level: u8,
}

impl GradeToken {
    pub fn new(stage: SchoolStage, level: u8) -> Self {
        Self { stage, level }
    }

    /// 解析 "초등5"、"초5"、"중학교 2학년"、"고 3" 等写法；无法解析返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = GRADE_TOKEN_RE.captures(raw.trim())?;
        let stage = SchoolStage::from_keyword(caps.get(1)?.as_str())?;
        let level = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { stage, level })
    }
}

impl std::fmt::Display for GradeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stage.prefix(), self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(
            GradeToken::parse("초등5"),
            Some(GradeToken::new(SchoolStage::Elementary, 5))
        );
        assert_eq!(
            GradeToken::parse("초5"),
            Some(GradeToken::new(SchoolStage::Elementary, 5))
        );
        assert_eq!(
            GradeToken::parse("중학교 2학년"),
            Some(GradeToken::new(SchoolStage::Middle, 2))
        );
        assert_eq!(
            GradeToken::parse("고 3"),
            Some(GradeToken::new(SchoolStage::High, 3))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(GradeToken::parse(""), None);
        assert_eq!(GradeToken::parse("중"), None);
        assert_eq!(GradeToken::parse("대학1"), None);
        assert_eq!(GradeToken::parse("middle 2"), None);
    }

    #[test]
    fn test_display_is_normalized() {
        assert_eq!(GradeToken::new(SchoolStage::Elementary, 4).to_string(), "초등4");
        assert_eq!(GradeToken::new(SchoolStage::High, 1).to_string(), "고1");
    }
}
