//! 应用外壳 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：打印启动信息、加载词库和真题库
//! 2. **请求分派**：`search` 开头的请求走真题检索，其余走出题
//! 3. **结果输出**：JSON 打印到 stdout，配置了 `output_file` 时同时写文件

use crate::config::Config;
use crate::models::loaders::{load_dataset, sample_exam_questions};
use crate::orchestrator::request_handler::RequestHandler;
use crate::utils::logging;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// 切换到真题检索的第一个参数
pub const SEARCH_COMMAND: &str = "search";

/// 一次运行要执行的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 出题
    Generate(String),
    /// 真题检索
    SearchExams(String),
}

impl Command {
    /// 由命令行参数构造；参数为空时返回 `None`，由调用方改读 stdin
    pub fn from_args(args: &[String]) -> Option<Self> {
        match args.split_first() {
            None => None,
            Some((first, rest)) if first == SEARCH_COMMAND => {
                Some(Command::SearchExams(rest.join(" ")))
            }
            Some(_) => Some(Command::Generate(args.join(" "))),
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    handler: RequestHandler,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let dataset = load_dataset(config.dataset_path.as_deref())
            .await
            .with_context(|| {
                format!(
                    "无法加载词库: {}",
                    config.dataset_path.as_deref().unwrap_or("内置样本")
                )
            })?;
        if dataset.is_empty() {
            warn!("⚠️ 词库为空，所有请求都不会生成题目");
        }
        logging::log_dataset_loaded(&dataset);

        let exam_bank = sample_exam_questions().context("无法加载真题库")?;
        info!("✓ 真题库加载完成: {} 道", exam_bank.len());

        let handler = RequestHandler::new(dataset, exam_bank, config.clone());
        Ok(Self { config, handler })
    }

    /// 执行请求并返回格式化后的 JSON
    pub async fn execute(&self, command: &Command) -> Result<String> {
        let json = match command {
            Command::Generate(text) => {
                let response = self.handler.generate(text).await?;
                serde_json::to_string_pretty(&response)?
            }
            Command::SearchExams(text) => {
                let response = self.handler.search_exams(text).await?;
                serde_json::to_string_pretty(&response)?
            }
        };
        Ok(json)
    }

    /// 运行应用主逻辑
    pub async fn run(&self, command: Command) -> Result<()> {
        let json = self.execute(&command).await?;
        println!("{}", json);

        if let Some(path) = &self.config.output_file {
            tokio::fs::write(path, &json)
                .await
                .with_context(|| format!("无法写入输出文件: {}", path))?;
            info!("💾 结果已保存至: {}", path);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_command_from_args() {
        assert_eq!(Command::from_args(&[]), None);
        assert_eq!(
            Command::from_args(&args(&["고1", "명사", "5개"])),
            Some(Command::Generate("고1 명사 5개".to_string()))
        );
        assert_eq!(
            Command::from_args(&args(&["search", "작년", "수능"])),
            Some(Command::SearchExams("작년 수능".to_string()))
        );
    }

    #[tokio::test]
    async fn test_initialize_with_sample_and_execute() {
        let config = Config {
            rng_seed: Some(1),
            ..Config::default()
        };
        let app = App::initialize(config).await.unwrap();
        let json = app
            .execute(&Command::Generate("초등 명사 3개".to_string()))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["problems"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_initialize_fails_for_missing_dataset() {
        let config = Config {
            dataset_path: Some("/no/such/words.tsv".to_string()),
            ..Config::default()
        };
        let err = App::initialize(config).await.err().unwrap();
        assert!(err.to_string().contains("/no/such/words.tsv"));
    }

    #[tokio::test]
    async fn test_search_command_with_empty_text_is_rejected() {
        let app = App::initialize(Config::default()).await.unwrap();
        assert!(app.execute(&Command::SearchExams(String::new())).await.is_err());
    }
}
