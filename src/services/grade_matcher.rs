//! 学年范围匹配 - 业务能力层
//!
//! 判断某个学年（"중2"）是否落在词条的学年范围描述（"중1-중3"）之内。

use crate::models::grade::{GradeToken, SchoolStage, STAGE_KEYWORD};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// "초3-초6"、"중 1 ~ 중 3"、"고1-3"
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({STAGE_KEYWORD})\s*(\d{{1,2}})\s*[-~]\s*(?:({STAGE_KEYWORD})\s*)?(\d{{1,2}})$"
    ))
    .expect("学年范围正则必须合法")
});

/// 只有学段，例如 "초등"、"중학교"
static BARE_STAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:{STAGE_KEYWORD})$")).expect("学段正则必须合法")
});

/// 学年范围描述的解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GradeRange {
    /// 同一学段内的闭区间
    Span { stage: SchoolStage, from: u8, to: u8 },
    /// 单个学年
    Single(GradeToken),
    /// 整个学段
    Stage(SchoolStage),
}

impl GradeRange {
    fn parse(descriptor: &str) -> Option<Self> {
        if let Some(caps) = RANGE_RE.captures(descriptor) {
            let stage = SchoolStage::from_keyword(caps.get(1)?.as_str())?;
            // 跨学段的区间（"중1-고3"）不支持
            if let Some(end_stage) = caps.get(3) {
                if SchoolStage::from_keyword(end_stage.as_str())? != stage {
                    return None;
                }
            }
            let from = caps.get(2)?.as_str().parse().ok()?;
            let to = caps.get(4)?.as_str().parse().ok()?;
            return Some(GradeRange::Span { stage, from, to });
        }

        if let Some(token) = GradeToken::parse(descriptor) {
            return Some(GradeRange::Single(token));
        }

        if BARE_STAGE_RE.is_match(descriptor) {
            return SchoolStage::from_keyword(descriptor).map(GradeRange::Stage);
        }

        None
    }

    fn contains(self, token: GradeToken) -> bool {
        match self {
            GradeRange::Span { stage, from, to } => {
                token.stage == stage && (from..=to).contains(&token.level)
            }
            GradeRange::Single(single) => single == token,
            GradeRange::Stage(stage) => token.stage == stage,
        }
    }
}

/// 判断学年是否落在范围描述之内
///
/// 优先级：
/// 1. 字符串完全相同
/// 2. 区间 "学段N-学段M"：学段相同且 N ≤ 年级 ≤ M；两端学段不同的区间不匹配
/// 3. 单个学年 "중2"：学段和年级都相同
/// 4. 只有学段 "고등"：学段相同即可
///
/// 空描述、无法解析的描述或学年一律不匹配。
pub fn matches(grade_level: &str, descriptor: &str) -> bool {
    let grade_level = grade_level.trim();
    let descriptor = descriptor.trim();

    if descriptor.is_empty() {
        return false;
    }
    if grade_level == descriptor {
        return true;
    }

    let Some(token) = GradeToken::parse(grade_level) else {
        trace!("无法解析学年: {}", grade_level);
        return false;
    };

    match GradeRange::parse(descriptor) {
        Some(range) => range.contains(token),
        None => {
            trace!("无法解析学年范围: {}", descriptor);
            false
        }
    }
}
