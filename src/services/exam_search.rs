//! 历年真题检索 - 业务能力层
//!
//! 从 "작년 수능 빈칸 킬러 문제" 这样的请求中提取年份、月份、考试类型、
//! 题型和难度，再在题库中做合取过滤。

use crate::models::exam::{ExamDifficulty, ExamQuestion, ExamSearchCriteria};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])(\d{4})(?:[^0-9]|$)").expect("年份正则必须合法")
});

/// 相对年份，按顺序检查（"재작년" 包含 "작년"，必须先查）
const RELATIVE_YEARS: [(&str, i32); 3] = [("재작년", -2), ("작년", -1), ("올해", 0)];

/// (关键字, 考试类型, 月份)
const EXAM_TYPE_RULES: [(&[&str], &str, Option<u32>); 6] = [
    (&["수능", "수학능력시험"], "수능", Some(11)),
    (&["6월", "6모"], "모의고사", Some(6)),
    (&["9월", "9모"], "모의고사", Some(9)),
    (&["3월", "3모"], "학력평가", Some(3)),
    (&["모의고사"], "모의고사", None),
    (&["학평", "학력평가"], "학력평가", None),
];

const QUESTION_TYPE_RULES: [(&[&str], &str); 9] = [
    (&["빈칸"], "빈칸추론"),
    (&["순서"], "순서배열"),
    (&["삽입", "문장 넣기"], "문장삽입"),
    (&["어법", "문법"], "어법"),
    (&["어휘"], "어휘"),
    (&["주제"], "주제"),
    (&["요지"], "요지"),
    (&["제목"], "제목"),
    (&["요약"], "요약문"),
];

/// 难度：关键字或独立的 상/중/하（前后不紧跟韩文）
static DIFFICULTY_RULES: LazyLock<Vec<(Regex, ExamDifficulty)>> = LazyLock::new(|| {
    [
        (r"3점|어려운|킬러|(?:^|[^가-힣])상(?:[^가-힣]|$)", ExamDifficulty::High),
        (r"2점|쉬운|(?:^|[^가-힣])하(?:[^가-힣]|$)", ExamDifficulty::Low),
        (r"보통|(?:^|[^가-힣])중(?:[^가-힣]|$)", ExamDifficulty::Medium),
    ]
    .into_iter()
    .map(|(pattern, level)| (Regex::new(pattern).expect("难度正则必须合法"), level))
    .collect()
});

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| query.contains(k))
}

/// 提取真题检索条件
///
/// `current_year` 由调用方注入，用于解析 "작년"、"올해" 等相对年份。
pub fn parse_exam_query(query: &str, current_year: i32) -> ExamSearchCriteria {
    let mut criteria = ExamSearchCriteria::default();

    criteria.exam_year = YEAR_RE
        .captures(query)
        .and_then(|caps| caps.get(1)?.as_str().parse().ok())
        .or_else(|| {
            RELATIVE_YEARS
                .iter()
                .find(|(word, _)| query.contains(word))
                .map(|(_, offset)| current_year + offset)
        });

    if let Some((_, exam_type, month)) = EXAM_TYPE_RULES
        .iter()
        .find(|(keywords, _, _)| contains_any(query, keywords))
    {
        criteria.exam_type = Some(exam_type.to_string());
        criteria.exam_month = *month;
    }

    criteria.question_type = QUESTION_TYPE_RULES
        .iter()
        .find(|(keywords, _)| contains_any(query, keywords))
        .map(|(_, question_type)| question_type.to_string());

    criteria.difficulty = DIFFICULTY_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(query))
        .map(|(_, level)| *level);

    debug!("真题检索条件: {:?}", criteria);
    criteria
}

/// 按条件过滤题库，未设置的条件跳过
///
/// 题型按包含关系匹配，其余字段按相等匹配。
pub fn filter_exam_questions<'a>(
    criteria: &ExamSearchCriteria,
    bank: &'a [ExamQuestion],
) -> Vec<&'a ExamQuestion> {
    bank.iter()
        .filter(|q| criteria.exam_year.map_or(true, |y| q.exam_year == y))
        .filter(|q| criteria.exam_month.map_or(true, |m| q.exam_month == m))
        .filter(|q| {
            criteria
                .exam_type
                .as_deref()
                .map_or(true, |t| q.exam_type == t)
        })
        .filter(|q| {
            criteria
                .question_type
                .as_deref()
                .map_or(true, |t| q.question_type.contains(t))
        })
        .filter(|q| criteria.difficulty.map_or(true, |d| q.difficulty == d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, year: i32, month: u32, exam_type: &str, qtype: &str, d: ExamDifficulty) -> ExamQuestion {
        ExamQuestion {
            id: id.to_string(),
            exam_type: exam_type.to_string(),
            exam_year: year,
            exam_month: month,
            question_number: 31,
            question_type: qtype.to_string(),
            difficulty: d,
            correct_rate: None,
            passage: String::new(),
            choices: Vec::new(),
            answer: "①".to_string(),
            explanation: None,
        }
    }

    #[test]
    fn test_explicit_year_and_csat() {
        let c = parse_exam_query("2024년 수능 빈칸 문제", 2026);
        assert_eq!(c.exam_year, Some(2024));
        assert_eq!(c.exam_type.as_deref(), Some("수능"));
        assert_eq!(c.exam_month, Some(11));
        assert_eq!(c.question_type.as_deref(), Some("빈칸추론"));
    }

    #[test]
    fn test_relative_years() {
        assert_eq!(parse_exam_query("작년 수능", 2026).exam_year, Some(2025));
        assert_eq!(parse_exam_query("재작년 수능", 2026).exam_year, Some(2024));
        assert_eq!(parse_exam_query("올해 6모", 2026).exam_year, Some(2026));
        assert_eq!(parse_exam_query("수능 문제", 2026).exam_year, None);
    }

    #[test]
    fn test_mock_exam_months() {
        let c = parse_exam_query("9모 순서 문제", 2026);
        assert_eq!(c.exam_type.as_deref(), Some("모의고사"));
        assert_eq!(c.exam_month, Some(9));
        assert_eq!(c.question_type.as_deref(), Some("순서배열"));

        let c = parse_exam_query("3월 학평", 2026);
        assert_eq!(c.exam_type.as_deref(), Some("학력평가"));
        assert_eq!(c.exam_month, Some(3));

        let c = parse_exam_query("학력평가 어법", 2026);
        assert_eq!(c.exam_type.as_deref(), Some("학력평가"));
        assert_eq!(c.exam_month, None);
        assert_eq!(c.question_type.as_deref(), Some("어법"));
    }

    #[test]
    fn test_difficulty_keywords() {
        assert_eq!(parse_exam_query("킬러 문제", 2026).difficulty, Some(ExamDifficulty::High));
        assert_eq!(parse_exam_query("난이도 상", 2026).difficulty, Some(ExamDifficulty::High));
        assert_eq!(parse_exam_query("2점짜리", 2026).difficulty, Some(ExamDifficulty::Low));
        assert_eq!(parse_exam_query("난이도 중", 2026).difficulty, Some(ExamDifficulty::Medium));
        assert_eq!(parse_exam_query("보통 문제", 2026).difficulty, Some(ExamDifficulty::Medium));
    }

    #[test]
    fn test_difficulty_ignores_embedded_syllables() {
        // "문장삽입"、"요약하기"、"중학교" 里的 상/하/중 不算难度
        assert_eq!(parse_exam_query("요약하기", 2026).difficulty, None);
        assert_eq!(parse_exam_query("중학교 수준 제목", 2026).difficulty, None);
        assert_eq!(parse_exam_query("상상력", 2026).difficulty, None);
    }

    #[test]
    fn test_empty_query() {
        assert!(parse_exam_query("", 2026).is_empty());
        assert!(parse_exam_query("아무거나", 2026).is_empty());
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let bank = vec![
            question("a", 2024, 11, "수능", "빈칸추론", ExamDifficulty::High),
            question("b", 2024, 6, "모의고사", "빈칸추론", ExamDifficulty::Medium),
            question("c", 2023, 11, "수능", "순서배열", ExamDifficulty::High),
        ];

        let criteria = ExamSearchCriteria {
            exam_year: Some(2024),
            question_type: Some("빈칸".to_string()),
            ..Default::default()
        };
        let ids: Vec<&str> = filter_exam_questions(&criteria, &bank)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);

        let criteria = ExamSearchCriteria {
            exam_type: Some("수능".to_string()),
            difficulty: Some(ExamDifficulty::High),
            ..Default::default()
        };
        assert_eq!(filter_exam_questions(&criteria, &bank).len(), 2);

        assert_eq!(
            filter_exam_questions(&ExamSearchCriteria::default(), &bank).len(),
            3
        );
    }
}
