use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "VOCAB_QUIZ_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 词库文件路径（.tsv / .csv / .toml），不设置时使用内置样本
    pub dataset_path: Option<String>,
    /// 请求文本的最大字符数
    pub max_input_chars: usize,
    /// 单次请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 固定随机种子，设置后同样的请求得到同样的题目
    pub rng_seed: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 结果 JSON 的输出文件
    pub output_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            max_input_chars: 10_000,
            request_timeout_secs: 30,
            rng_seed: None,
            verbose_logging: false,
            output_file: None,
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件读取，缺省的字段取默认值
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// `VOCAB_QUIZ_CONFIG` 指向的配置文件（可选），再叠加环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// 用 `lookup` 提供的值覆盖对应字段，空值视为未设置
    pub fn with_overrides<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            dataset_path: get("VOCAB_DATASET_PATH").or(self.dataset_path),
            max_input_chars: parse_or("MAX_INPUT_CHARS", get("MAX_INPUT_CHARS"), self.max_input_chars)?,
            request_timeout_secs: parse_or(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                self.request_timeout_secs,
            )?,
            rng_seed: match get("QUIZ_RNG_SEED") {
                Some(v) => Some(parse_value("QUIZ_RNG_SEED", &v)?),
                None => self.rng_seed,
            },
            verbose_logging: match get("VERBOSE_LOGGING") {
                Some(v) => parse_bool("VERBOSE_LOGGING", &v)?,
                None => self.verbose_logging,
            },
            output_file: get("OUTPUT_FILE").or(self.output_file),
        })
    }
}

fn parse_or<T: FromStr>(var_name: &str, raw: Option<String>, current: T) -> Result<T, ConfigError> {
    match raw {
        Some(v) => parse_value(var_name, &v),
        None => Ok(current),
    }
}

fn parse_value<T: FromStr>(var_name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
        var_name: var_name.to_string(),
        value: raw.to_string(),
        expected_type: std::any::type_name::<T>().to_string(),
    })
}

fn parse_bool(var_name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: raw.to_string(),
            expected_type: "bool".to_string(),
        }),
    }
}
