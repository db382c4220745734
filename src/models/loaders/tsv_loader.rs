//! 表格（TSV）词库导入
//!
//! 表头决定列位置；品词缩写映射为全称，学年范围原样保留。

use crate::error::{AppError, AppResult, DatasetError};
use crate::models::vocabulary::VocabularyRecord;
use phf::phf_map;
use std::path::Path;
use tokio::fs;

/// 品词缩写 → 全称
static POS_ABBREVIATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "N" => "noun",
    "V" => "verb",
    "ADJ" => "adjective",
    "ADV" => "adverb",
    "PRON" => "pronoun",
    "PREP" => "preposition",
    "CONJ" => "conjunction",
    "DET" => "article",
    "INTJ" => "interjection",
    "NUM" => "numeral",
};

const COL_WORD: &str = "word_display";
const COL_POS: &str = "pos";
const COL_MEANING_KO: &str = "meaning_ko";
const COL_DEFINITION_EN: &str = "definition_en";
const COL_SENTENCE: &str = "sentence_1";
const COL_SYNONYM: &str = "synonym";
const COL_ANTONYM: &str = "antonym";
const COL_CEFR: &str = "cefr";
const COL_GRADE_RANGE: &str = "grade_range";

/// 规范化品词：已知缩写映射为全称，其余转小写
pub fn normalize_pos(raw: &str) -> String {
    let trimmed = raw.trim();
    match POS_ABBREVIATIONS.get(trimmed.to_uppercase().as_str()) {
        Some(full) => (*full).to_string(),
        None => trimmed.to_lowercase(),
    }
}

/// 首字母小写
fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 列位置
struct Columns {
    word: usize,
    pos: usize,
    meaning_ko: usize,
    definition_en: Option<usize>,
    sentence: Option<usize>,
    synonym: Option<usize>,
    antonym: Option<usize>,
    cefr: Option<usize>,
    grade_range: Option<usize>,
}

impl Columns {
    fn from_header(header: &[&str]) -> AppResult<Self> {
        let find = |name: &str| header.iter().position(|h| *h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                AppError::from(DatasetError::MissingColumn {
                    column: name.to_string(),
                })
            })
        };

        Ok(Self {
            word: require(COL_WORD)?,
            pos: require(COL_POS)?,
            meaning_ko: require(COL_MEANING_KO)?,
            definition_en: find(COL_DEFINITION_EN),
            sentence: find(COL_SENTENCE),
            synonym: find(COL_SYNONYM),
            antonym: find(COL_ANTONYM),
            cefr: find(COL_CEFR),
            grade_range: find(COL_GRADE_RANGE),
        })
    }
}

fn cell<'a>(cols: &[&'a str], index: Option<usize>) -> &'a str {
    index.and_then(|i| cols.get(i).copied()).unwrap_or("")
}

/// 解析 TSV 文本（不处理引号内的制表符/换行）
pub fn parse_vocabulary_tsv(content: &str) -> AppResult<Vec<VocabularyRecord>> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<&str> = header_line.split('\t').map(str::trim).collect();
    let columns = Columns::from_header(&header)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in lines {
        let cols: Vec<&str> = line.split('\t').map(str::trim).collect();

        let word = cell(&cols, Some(columns.word));
        if word.is_empty() {
            skipped += 1;
            continue;
        }

        let synonym = cell(&cols, columns.synonym);
        let antonym = cell(&cols, columns.antonym);

        records.push(VocabularyRecord {
            word: lowercase_first(word),
            part_of_speech: normalize_pos(cell(&cols, Some(columns.pos))),
            korean_definition: cell(&cols, Some(columns.meaning_ko)).to_string(),
            english_definition: cell(&cols, columns.definition_en).to_string(),
            example_sentence: cell(&cols, columns.sentence).to_string(),
            synonyms_antonyms_raw: format!("{} / {}", synonym, antonym),
            cefr_level: cell(&cols, columns.cefr).to_uppercase(),
            grade_range_descriptor: cell(&cols, columns.grade_range).to_string(),
        });
    }

    if skipped > 0 {
        tracing::debug!("跳过 {} 行缺少单词的数据", skipped);
    }

    Ok(records)
}

/// 从 TSV 文件加载词汇
pub async fn load_vocabulary_tsv(path: &Path) -> AppResult<Vec<VocabularyRecord>> {
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(DatasetError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::dataset_read_failed(&path_str, e))?;

    let records = parse_vocabulary_tsv(&content)?;
    tracing::info!("TSV 加载完成: {} 个词汇", records.len());
    Ok(records)
}
