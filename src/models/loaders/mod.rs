pub mod sample;
pub mod toml_loader;
pub mod tsv_loader;

pub use sample::{sample_exam_questions, sample_vocabulary};
pub use toml_loader::{load_vocabulary_toml, parse_vocabulary_toml};
pub use tsv_loader::{load_vocabulary_tsv, parse_vocabulary_tsv};

use crate::error::{AppResult, DatasetError};
use crate::models::vocabulary::VocabularyRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 词库来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// 内置示例
    Sample,
    /// 表格导入
    Tsv,
    /// TOML 文件
    Toml,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataSource::Sample => "sample",
            DataSource::Tsv => "tsv",
            DataSource::Toml => "toml",
        };
        write!(f, "{}", name)
    }
}

/// 加载后的只读词库
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<VocabularyRecord>,
    pub source: DataSource,
}

impl Dataset {
    pub fn new(records: Vec<VocabularyRecord>, source: DataSource) -> Self {
        Self { records, source }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 按路径扩展名选择加载器；未指定路径时使用内置示例
pub async fn load_dataset(path: Option<&str>) -> AppResult<Dataset> {
    let Some(path) = path else {
        return Ok(Dataset::new(sample_vocabulary()?, DataSource::Sample));
    };

    let path = Path::new(path);
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("tsv") | Some("csv") | Some("txt") => {
            Ok(Dataset::new(load_vocabulary_tsv(path).await?, DataSource::Tsv))
        }
        Some("toml") => Ok(Dataset::new(load_vocabulary_toml(path).await?, DataSource::Toml)),
        _ => Err(DatasetError::UnsupportedFormat {
            path: path.display().to_string(),
        }
        .into()),
    }
}
