//! 单题生成流程 - 流程层
//!
//! 核心职责：为一个词条生成一道题
//!
//! 六种题型各自是一个无状态函数，由 `generate_problem` 按 `ProblemType`
//! 分派（match 穷尽检查，新增题型时编译器会提示）。
//!
//! | 题型 | 题干 | 正确答案 | 干扰项 |
//! |---|---|---|---|
//! | 객관식 | 单词 + 品词 | 韩文释义 | 韩文释义 |
//! | 빈칸채우기 | 挖空的例句 | 单词 | 单词 |
//! | 영영풀이 | 英文释义 | 单词 | 单词 |
//! | 동의어 | 单词 | 第一个同义词 | 单词 |
//! | 반의어 | 单词 | 第一个反义词 | 单词 |
//! | 철자맞추기 | 韩文释义 + 部分遮盖的单词 | 单词 | 单词 |

use crate::models::criteria::ProblemType;
use crate::models::problem::GeneratedProblem;
use crate::models::vocabulary::VocabularyRecord;
use crate::services::distractor::{select_distractors, DistractorField};
use crate::workflow::problem_ctx::ProblemCtx;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::collections::HashSet;
use tracing::trace;

/// 每道题的干扰项个数（加上正确答案共 4 个选项）
pub const DISTRACTOR_COUNT: usize = 3;

/// 例句中替换目标词的占位符
const BLANK: &str = "________";

/// 拼写题的遮盖字符
const MASK_CHAR: char = '_';

/// 生成一道题
pub fn generate_problem<R: Rng + ?Sized>(
    problem_type: ProblemType,
    target: &VocabularyRecord,
    pool: &[VocabularyRecord],
    ctx: &ProblemCtx,
    rng: &mut R,
) -> GeneratedProblem {
    trace!("{} 生成 {} 题: {}", ctx, problem_type, target.word);

    match problem_type {
        ProblemType::MultipleChoice => multiple_choice(target, pool, ctx, rng),
        ProblemType::FillInBlank => fill_in_blank(target, pool, ctx, rng),
        ProblemType::EnglishDefinition => english_definition(target, pool, ctx, rng),
        ProblemType::Synonym => synonym(target, pool, ctx, rng),
        ProblemType::Antonym => antonym(target, pool, ctx, rng),
        ProblemType::Spelling => spelling(target, pool, ctx, rng),
    }
}

/// 题目的公共部分：正确答案与干扰项合并后打乱
struct Draft {
    problem_type: ProblemType,
    question_text: String,
    correct_answer: String,
    distractors: Vec<String>,
    explanation_text: String,
}

impl Draft {
    fn finish<R: Rng + ?Sized>(
        self,
        target: &VocabularyRecord,
        ctx: &ProblemCtx,
        rng: &mut R,
    ) -> GeneratedProblem {
        let mut choices = Vec::with_capacity(self.distractors.len() + 1);
        choices.push(self.correct_answer.clone());
        choices.extend(self.distractors);
        choices.shuffle(rng);

        GeneratedProblem {
            id: ctx.problem_id(),
            problem_type: self.problem_type,
            source_word: target.word.clone(),
            question_text: self.question_text,
            choices,
            correct_answer: self.correct_answer,
            explanation_text: self.explanation_text,
        }
    }
}

fn multiple_choice<R: Rng + ?Sized>(
    target: &VocabularyRecord,
    pool: &[VocabularyRecord],
    ctx: &ProblemCtx,
    rng: &mut R,
) -> GeneratedProblem {
    let distractors = select_distractors(
        target,
        pool,
        DISTRACTOR_COUNT,
        DistractorField::KoreanDefinition,
        &[],
        rng,
    );

    Draft {
        problem_type: ProblemType::MultipleChoice,
        question_text: format!(
            "다음 단어의 의미로 가장 적절한 것은?\n\n{} ({})",
            target.word, target.part_of_speech
        ),
        correct_answer: target.korean_definition.trim().to_string(),
        distractors,
        explanation_text: format!(
            "{}: {}\n예문: {}",
            target.word, target.korean_definition, target.example_sentence
        ),
    }
    .finish(target, ctx, rng)
}

fn fill_in_blank<R: Rng + ?Sized>(
    target: &VocabularyRecord,
    pool: &[VocabularyRecord],
    ctx: &ProblemCtx,
    rng: &mut R,
) -> GeneratedProblem {
    let distractors =
        select_distractors(target, pool, DISTRACTOR_COUNT, DistractorField::Word, &[], rng);

    Draft {
        problem_type: ProblemType::FillInBlank,
        question_text: format!(
            "다음 빈칸에 들어갈 가장 적절한 단어는?\n\n{}",
            blank_out(&target.example_sentence, &target.word)
        ),
        correct_answer: target.word.trim().to_string(),
        distractors,
        explanation_text: format!(
            "정답: {} ({})\n완성 문장: {}",
            target.word, target.korean_definition, target.example_sentence
        ),
    }
    .finish(target, ctx, rng)
}

fn english_definition<R: Rng + ?Sized>(
    target: &VocabularyRecord,
    pool: &[VocabularyRecord],
    ctx: &ProblemCtx,
    rng: &mut R,
) -> GeneratedProblem {
    let distractors =
        select_distractors(target, pool, DISTRACTOR_COUNT, DistractorField::Word, &[], rng);

    Draft {
        problem_type: ProblemType::EnglishDefinition,
        question_text: format!(
            "다음 영어 정의에 해당하는 단어는?\n\n\"{}\"",
            target.english_definition
        ),
        correct_answer: target.word.trim().to_string(),
        distractors,
        explanation_text: format!(
            "정답: {} ({})\n정의: {}",
            target.word, target.korean_definition, target.english_definition
        ),
    }
    .finish(target, ctx, rng)
}

fn synonym<R: Rng + ?Sized>(
    target: &VocabularyRecord,
    pool: &[VocabularyRecord],
    ctx: &ProblemCtx,
    rng: &mut R,
) -> GeneratedProblem {
    let synonyms = target.synonyms();
    // 没有同义词时退回到韩文释义
    let correct = synonyms
        .first()
        .cloned()
        .unwrap_or_else(|| target.korean_definition.trim().to_string());
    let distractors = select_distractors(
        target,
        pool,
        DISTRACTOR_COUNT,
        DistractorField::Word,
        &[correct.as_str()],
        rng,
    );

    Draft {
        problem_type: ProblemType::Synonym,
        question_text: format!("다음 단어와 의미가 가장 유사한 것은?\n\n{}", target.word),
        correct_answer: correct,
        distractors,
        explanation_text: format!(
            "{}의 동의어: {}\n뜻: {}",
            target.word,
            join_or_none(&synonyms),
            target.korean_definition
        ),
    }
    .finish(target, ctx, rng)
}

fn antonym<R: Rng + ?Sized>(
    target: &VocabularyRecord,
    pool: &[VocabularyRecord],
    ctx: &ProblemCtx,
    rng: &mut R,
) -> GeneratedProblem {
    let antonyms = target.antonyms();
    let correct = antonyms
        .first()
        .cloned()
        .unwrap_or_else(|| target.korean_definition.trim().to_string());
    let distractors = select_distractors(
        target,
        pool,
        DISTRACTOR_COUNT,
        DistractorField::Word,
        &[correct.as_str()],
        rng,
    );

    Draft {
        problem_type: ProblemType::Antonym,
        question_text: format!("다음 단어와 의미가 반대인 것은?\n\n{}", target.word),
        correct_answer: correct,
        distractors,
        explanation_text: format!(
            "{}의 반의어: {}\n뜻: {}",
            target.word,
            join_or_none(&antonyms),
            target.korean_definition
        ),
    }
    .finish(target, ctx, rng)
}

fn spelling<R: Rng + ?Sized>(
    target: &VocabularyRecord,
    pool: &[VocabularyRecord],
    ctx: &ProblemCtx,
    rng: &mut R,
) -> GeneratedProblem {
    let masked = mask_word(&target.word, rng);
    let distractors =
        select_distractors(target, pool, DISTRACTOR_COUNT, DistractorField::Word, &[], rng);

    Draft {
        problem_type: ProblemType::Spelling,
        question_text: format!(
            "다음 한글 뜻을 보고 올바른 철자의 단어를 고르세요.\n\n뜻: {}\n힌트: {}",
            target.korean_definition, masked
        ),
        correct_answer: target.word.trim().to_string(),
        distractors,
        explanation_text: format!("정답: {}\n뜻: {}", target.word, target.korean_definition),
    }
    .finish(target, ctx, rng)
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "없음".to_string()
    } else {
        items.join(", ")
    }
}

/// 把例句中的目标词（整词、忽略大小写）替换成空格线
pub fn blank_out(sentence: &str, word: &str) -> String {
    let word = word.trim();
    if word.is_empty() {
        return sentence.to_string();
    }

    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))) {
        Ok(re) => re.replace_all(sentence, BLANK).into_owned(),
        Err(_) => sentence.to_string(),
    }
}

/// 遮盖单词的部分字母
///
/// 首字母和空白不遮盖；遮盖数按首字母之后的全部字符计 40%（向上取整，至少 1 个），
/// 不超过可遮盖的位置数。单字母的单词没有可遮盖的位置，原样返回。
pub fn mask_word<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let chars: Vec<char> = word.trim().chars().collect();
    let eligible: Vec<usize> = (1..chars.len())
        .filter(|&i| !chars[i].is_whitespace())
        .collect();
    if eligible.is_empty() {
        return chars.into_iter().collect();
    }

    let hidden = ((chars.len() - 1) * 2).div_ceil(5).clamp(1, eligible.len());
    let positions: HashSet<usize> = eligible.choose_multiple(rng, hidden).copied().collect();

    chars
        .into_iter()
        .enumerate()
        .map(|(i, c)| if positions.contains(&i) { MASK_CHAR } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(word: &str, pos: &str, definition: &str, related: &str) -> VocabularyRecord {
        VocabularyRecord {
            word: word.to_string(),
            part_of_speech: pos.to_string(),
            korean_definition: definition.to_string(),
            english_definition: format!("the meaning of {word}"),
            example_sentence: format!("I like the {word} very much."),
            synonyms_antonyms_raw: related.to_string(),
            cefr_level: "A2".to_string(),
            grade_range_descriptor: "중1-중3".to_string(),
        }
    }

    fn pool() -> Vec<VocabularyRecord> {
        vec![
            record("big", "adjective", "큰", "large, huge / small, little"),
            record("happy", "adjective", "행복한", "glad / sad"),
            record("quiet", "adjective", "조용한", "silent / noisy"),
            record("brave", "adjective", "용감한", "- / -"),
            record("small", "adjective", "작은", "little / big"),
            record("apple", "noun", "사과", ""),
            record("river", "noun", "강", ""),
            record("doctor", "noun", "의사", ""),
            record("window", "noun", "창문", ""),
        ]
    }

    fn assert_well_formed(problem: &GeneratedProblem) {
        assert_eq!(problem.choices.len(), 4, "{:?}", problem);
        let hits = problem
            .choices
            .iter()
            .filter(|c| *c == &problem.correct_answer)
            .count();
        assert_eq!(hits, 1, "{:?}", problem);
        let unique: HashSet<&String> = problem.choices.iter().collect();
        assert_eq!(unique.len(), 4, "{:?}", problem);
    }

    #[test]
    fn test_every_type_produces_four_choices() {
        let pool = pool();
        for problem_type in ProblemType::ALL {
            for seed in 0..40 {
                let mut rng = StdRng::seed_from_u64(seed);
                let ctx = ProblemCtx::new(7, seed as usize);
                for target in &pool {
                    let problem = generate_problem(problem_type, target, &pool, &ctx, &mut rng);
                    assert_eq!(problem.problem_type, problem_type);
                    assert_eq!(problem.source_word, target.word);
                    assert_eq!(problem.id, ctx.problem_id());
                    assert_well_formed(&problem);
                }
            }
        }
    }

    #[test]
    fn test_multiple_choice_uses_definitions() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(3);
        let problem = generate_problem(
            ProblemType::MultipleChoice,
            &pool[0],
            &pool,
            &ProblemCtx::new(1, 0),
            &mut rng,
        );
        assert_eq!(problem.correct_answer, "큰");
        assert!(problem.question_text.contains("big (adjective)"));
        // 同品词的释义足够 3 个，干扰项全部来自形容词
        let adjective_defs = ["큰", "행복한", "조용한", "용감한", "작은"];
        assert!(problem.choices.iter().all(|c| adjective_defs.contains(&c.as_str())));
    }

    #[test]
    fn test_fill_in_blank_masks_sentence() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(5);
        let problem = generate_problem(
            ProblemType::FillInBlank,
            &pool[6],
            &pool,
            &ProblemCtx::new(1, 0),
            &mut rng,
        );
        assert_eq!(problem.correct_answer, "river");
        assert!(problem.question_text.contains("I like the ________ very much."));
        assert!(!problem.question_text.contains("river"));
        assert!(problem.explanation_text.contains("I like the river very much."));
    }

    #[test]
    fn test_blank_out_is_whole_word_and_case_insensitive() {
        assert_eq!(
            blank_out("Run fast, run! Running is fun.", "run"),
            "________ fast, ________! Running is fun."
        );
        assert_eq!(blank_out("No match here.", "apple"), "No match here.");
        assert_eq!(blank_out("a.b test", "a.b"), "________ test");
        assert_eq!(blank_out("sentence", ""), "sentence");
    }

    #[test]
    fn test_synonym_uses_first_synonym() {
        let pool = pool();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let problem = generate_problem(
                ProblemType::Synonym,
                &pool[0],
                &pool,
                &ProblemCtx::new(1, 0),
                &mut rng,
            );
            assert_eq!(problem.correct_answer, "large");
            assert!(problem.explanation_text.contains("large, huge"));
            assert_well_formed(&problem);
        }
    }

    #[test]
    fn test_antonym_excludes_answer_from_distractors() {
        let pool = pool();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            // big 的反义词 small 本身也在词库里
            let problem = generate_problem(
                ProblemType::Antonym,
                &pool[0],
                &pool,
                &ProblemCtx::new(1, 0),
                &mut rng,
            );
            assert_eq!(problem.correct_answer, "small");
            assert_well_formed(&problem);
        }
    }

    #[test]
    fn test_related_word_fallback_to_definition() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(9);
        let ctx = ProblemCtx::new(1, 0);

        let problem = generate_problem(ProblemType::Synonym, &pool[3], &pool, &ctx, &mut rng);
        assert_eq!(problem.correct_answer, "용감한");
        assert!(problem.explanation_text.contains("동의어: 없음"));

        let problem = generate_problem(ProblemType::Antonym, &pool[5], &pool, &ctx, &mut rng);
        assert_eq!(problem.correct_answer, "사과");
    }

    #[test]
    fn test_mask_word_rules() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let masked = mask_word("environment", &mut rng);
            assert_eq!(masked.chars().count(), 11);
            assert!(masked.starts_with('e'));
            // 10 个可遮盖位置，至少遮盖 4 个
            assert_eq!(masked.chars().filter(|&c| c == MASK_CHAR).count(), 4);
            for (m, o) in masked.chars().zip("environment".chars()) {
                assert!(m == o || m == MASK_CHAR);
            }
        }
    }

    #[test]
    fn test_mask_short_words() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(mask_word("go", &mut rng), "g_");
        assert_eq!(mask_word("a", &mut rng), "a");
        assert_eq!(mask_word("", &mut rng), "");

        let masked = mask_word("ice cream", &mut rng);
        assert_eq!(masked.chars().nth(3), Some(' '));
        assert!(masked.starts_with('i'));
    }

    #[test]
    fn test_mask_phrase_ratio_counts_every_later_char() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            // 首字母之后 8 个字符（含空格），至少遮盖 4 个
            let masked = mask_word("ice cream", &mut rng);
            assert_eq!(masked.chars().filter(|&c| c == MASK_CHAR).count(), 4);
            assert_eq!(masked.chars().nth(3), Some(' '));

            // 首字母之后 6 个字符，至少遮盖 3 个
            let masked = mask_word("look up", &mut rng);
            assert_eq!(masked.chars().filter(|&c| c == MASK_CHAR).count(), 3);
            assert!(masked.starts_with('l'));
            assert_eq!(masked.chars().nth(4), Some(' '));
        }
    }

    #[test]
    fn test_spelling_question_shows_hint() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(11);
        let problem = generate_problem(
            ProblemType::Spelling,
            &pool[7],
            &pool,
            &ProblemCtx::new(1, 0),
            &mut rng,
        );
        assert!(problem.question_text.contains("뜻: 의사"));
        assert!(problem.question_text.contains("힌트: d"));
        assert_eq!(problem.correct_answer, "doctor");
    }

    #[test]
    fn test_small_pool_yields_fewer_choices() {
        let pool = vec![record("apple", "noun", "사과", ""), record("river", "noun", "강", "")];
        let mut rng = StdRng::seed_from_u64(2);
        let problem = generate_problem(
            ProblemType::MultipleChoice,
            &pool[0],
            &pool,
            &ProblemCtx::new(1, 0),
            &mut rng,
        );
        assert_eq!(problem.choices.len(), 2);
        assert!(problem.choices.contains(&"사과".to_string()));
    }
}
