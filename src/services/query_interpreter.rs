//! 自然语言检索条件提取 - 业务能力层
//!
//! 把 "중학교 2학년 수준의 명사 20개로 객관식 문제 만들어줘" 这样的请求转成
//! `SearchCriteria`。纯关键字/正则匹配，没有识别到的字段取默认值，从不报错。
//!
//! 每个字段对应一张有序规则表，按顺序求值，第一条命中的规则生效
//! （品词例外：所有命中的规则都保留）。

use crate::models::criteria::{CefrLevel, Difficulty, PartOfSpeech, ProblemType, SearchCriteria};
use crate::models::grade::{GradeToken, SchoolStage};
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

/// 第二轮排除词提取最多保留的单词数
const MAX_HEURISTIC_EXCLUSIONS: usize = 3;

type Effect<T> = Box<dyn Fn(&Captures<'_>) -> Option<T> + Send + Sync>;

/// 一条提取规则：正则命中后由 effect 产出字段值
struct ExtractionRule<T> {
    name: &'static str,
    pattern: Regex,
    effect: Effect<T>,
}

impl<T: 'static> ExtractionRule<T> {
    fn new(
        name: &'static str,
        pattern: &str,
        effect: impl Fn(&Captures<'_>) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("提取规则正则必须合法"),
            effect: Box::new(effect),
        }
    }

    /// 命中即产出固定值
    fn constant(name: &'static str, pattern: &str, value: T) -> Self
    where
        T: Copy + Send + Sync + 'static,
    {
        Self::new(name, pattern, move |_| Some(value))
    }

    fn apply(&self, text: &str) -> Option<T> {
        let caps = self.pattern.captures(text)?;
        let value = (self.effect)(&caps)?;
        debug!("规则命中: {}", self.name);
        Some(value)
    }
}

/// 按顺序求值，返回第一条命中规则的结果
fn first_match<T: 'static>(rules: &[ExtractionRule<T>], text: &str) -> Option<T> {
    rules.iter().find_map(|rule| rule.apply(text))
}

/// 求值全部规则，保留所有命中结果
fn all_matches<T: 'static>(rules: &[ExtractionRule<T>], text: &str) -> Vec<T> {
    rules.iter().filter_map(|rule| rule.apply(text)).collect()
}

/// 取第一个捕获组中的年级数字
fn captured_level(caps: &Captures<'_>) -> Option<u8> {
    caps.get(1)?.as_str().parse().ok()
}

/// 学段对应的默认 CEFR 等级
fn default_cefr_for(stage: SchoolStage) -> CefrLevel {
    match stage {
        SchoolStage::Elementary => CefrLevel::A1,
        SchoolStage::Middle => CefrLevel::A2,
        SchoolStage::High => CefrLevel::B1,
    }
}

/// 自然语言检索条件提取器
pub struct QueryInterpreter {
    grade_rules: Vec<ExtractionRule<GradeToken>>,
    cefr_rules: Vec<ExtractionRule<CefrLevel>>,
    pos_rules: Vec<ExtractionRule<PartOfSpeech>>,
    type_rules: Vec<ExtractionRule<ProblemType>>,
    count_rules: Vec<ExtractionRule<usize>>,
    difficulty_rules: Vec<ExtractionRule<Difficulty>>,
    /// 'apple'은 빼고 / "run" 제외
    quoted_exclusion: Regex,
    /// 第一处排除动词
    exclusion_verb: Regex,
    latin_word: Regex,
}

impl QueryInterpreter {
    pub fn new() -> Self {
        // "빼고 10개" 中的 "고 1" 不算学年：短写法前面不能紧跟韩文
        let grade_rules = vec![
            ExtractionRule::new(
                "elementary-numbered",
                r"(?:^|[^가-힣])초(?:등학교|등)?\s*([1-6])(?:[^0-9]|$)",
                |caps| captured_level(caps).map(|l| GradeToken::new(SchoolStage::Elementary, l)),
            ),
            ExtractionRule::constant(
                "elementary-bare",
                r"초등",
                GradeToken::new(SchoolStage::Elementary, SchoolStage::Elementary.default_level()),
            ),
            ExtractionRule::new(
                "middle-numbered",
                r"(?:^|[^가-힣])중(?:학교|학|등학교|등)?\s*([1-3])(?:[^0-9]|$)",
                |caps| captured_level(caps).map(|l| GradeToken::new(SchoolStage::Middle, l)),
            ),
            ExtractionRule::constant(
                "middle-bare",
                r"중학|중등",
                GradeToken::new(SchoolStage::Middle, SchoolStage::Middle.default_level()),
            ),
            ExtractionRule::new(
                "high-numbered",
                r"(?:^|[^가-힣])고(?:등학교|등|교)?\s*([1-3])(?:[^0-9]|$)",
                |caps| captured_level(caps).map(|l| GradeToken::new(SchoolStage::High, l)),
            ),
            ExtractionRule::constant(
                "high-bare",
                r"고등|고교",
                GradeToken::new(SchoolStage::High, SchoolStage::High.default_level()),
            ),
        ];

        // 以下规则作用于小写化后的文本
        let cefr_rules = vec![ExtractionRule::new(
            "cefr-explicit",
            r"(?:^|[^a-z0-9])(?:cefr\s*)?([abc][12])(?:[^0-9]|$)",
            |caps| CefrLevel::parse(caps.get(1)?.as_str()),
        )];

        // "대명사" 不算 "명사"，"pronoun" 不算 "noun"，"adverb" 不算 "verb"
        let pos_rules = vec![
            ExtractionRule::constant("noun", r"(?:^|[^대])명사|(?:^|[^o])noun", PartOfSpeech::Noun),
            ExtractionRule::constant("verb", r"동사|(?:^|[^d])verb", PartOfSpeech::Verb),
            ExtractionRule::constant("adjective", r"형용사|adjective", PartOfSpeech::Adjective),
            ExtractionRule::constant("adverb", r"부사|adverb", PartOfSpeech::Adverb),
            ExtractionRule::constant("pronoun", r"대명사|pronoun", PartOfSpeech::Pronoun),
            ExtractionRule::constant("preposition", r"전치사|preposition", PartOfSpeech::Preposition),
            ExtractionRule::constant("conjunction", r"접속사|conjunction", PartOfSpeech::Conjunction),
        ];

        let type_rules = vec![
            ExtractionRule::constant(
                "fill-in-blank",
                r"빈칸|빈 칸|fill[\s-]?in|blank",
                ProblemType::FillInBlank,
            ),
            ExtractionRule::constant(
                "english-definition",
                r"영영|english[\s-]?definition",
                ProblemType::EnglishDefinition,
            ),
            ExtractionRule::constant("synonym", r"동의어|synonym", ProblemType::Synonym),
            ExtractionRule::constant("antonym", r"반의어|antonym", ProblemType::Antonym),
            ExtractionRule::constant("spelling", r"철자|spell", ProblemType::Spelling),
        ];

        // "A2 문제" 里的 2 不是题目数量
        let count_rules = vec![ExtractionRule::new(
            "item-count",
            r"(?:^|[^a-zA-Z0-9])(\d+)\s*(?:개|문제|문항|questions?)",
            |caps| {
                let digits = caps.get(1)?.as_str();
                // 超出 usize 的数字按上限处理
                let count = digits.parse::<usize>().unwrap_or(usize::MAX);
                Some(SearchCriteria::clamp_item_count(count))
            },
        )];

        let difficulty_rules = vec![
            ExtractionRule::constant("easy", r"쉬운|쉬움|easy", Difficulty::Easy),
            ExtractionRule::constant("hard", r"어려운|어려움|hard|difficult", Difficulty::Hard),
            ExtractionRule::constant("medium", r"보통|중간|medium", Difficulty::Medium),
        ];

        Self {
            grade_rules,
            cefr_rules,
            pos_rules,
            type_rules,
            count_rules,
            difficulty_rules,
            quoted_exclusion: Regex::new(
                r#"['"‘’“”]([^'"‘’“”]+)['"‘’“”]\s*(?:은|는)?\s*(?:빼|제외)"#,
            )
            .expect("排除词正则必须合法"),
            exclusion_verb: Regex::new(r"빼고?|제외하고?").expect("排除动词正则必须合法"),
            latin_word: Regex::new(r"[a-zA-Z]+").expect("英文单词正则必须合法"),
        }
    }

    /// 提取检索条件
    ///
    /// 纯函数：同样的输入总是得到同样的条件。
    pub fn interpret(&self, raw_text: &str) -> SearchCriteria {
        let lower = raw_text.to_lowercase();

        let mut criteria = SearchCriteria::default();

        if let Some(token) = first_match(&self.grade_rules, raw_text) {
            criteria.grade_level = Some(token.to_string());
            criteria.cefr_level = Some(default_cefr_for(token.stage));
        }

        // 明确指定的 CEFR 覆盖学年推出的默认值
        if let Some(level) = first_match(&self.cefr_rules, &lower) {
            criteria.cefr_level = Some(level);
        }

        criteria.parts_of_speech = all_matches(&self.pos_rules, &lower)
            .into_iter()
            .collect::<BTreeSet<_>>();

        criteria.problem_type = first_match(&self.type_rules, &lower).unwrap_or_default();

        if let Some(count) = first_match(&self.count_rules, raw_text) {
            criteria.item_count = count;
        }

        criteria.exclude_words = self.extract_exclusions(raw_text);

        criteria.difficulty = first_match(&self.difficulty_rules, &lower);

        debug!("检索条件: {:?}", criteria);
        criteria
    }

    /// 两轮提取排除词，结果直接拼接（允许重复）
    fn extract_exclusions(&self, raw_text: &str) -> Vec<String> {
        let mut words: Vec<String> = self
            .quoted_exclusion
            .captures_iter(raw_text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        // 启发式：第一个排除动词之前最后出现的至多 3 个英文单词
        if let Some(verb) = self.exclusion_verb.find(raw_text) {
            let before = &raw_text[..verb.start()];
            let latin: Vec<&str> = self.latin_word.find_iter(before).map(|m| m.as_str()).collect();
            let skip = latin.len().saturating_sub(MAX_HEURISTIC_EXCLUSIONS);
            words.extend(latin[skip..].iter().map(|w| w.to_lowercase()));
        }

        words
    }
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

static INTERPRETER: LazyLock<QueryInterpreter> = LazyLock::new(QueryInterpreter::new);

/// 使用全局共享的提取器解析请求
pub fn interpret(raw_text: &str) -> SearchCriteria {
    INTERPRETER.interpret(raw_text)
}
