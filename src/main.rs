use anyhow::{Context, Result};
use std::io::Read;
use vocab_quiz_gen::utils::logging;
use vocab_quiz_gen::{App, Command, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 请求文本：命令行参数优先，否则读 stdin
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::from_args(&args) {
        Some(command) => command,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("读取标准输入失败")?;
            Command::Generate(input.trim().to_string())
        }
    };

    // 初始化并运行应用
    App::initialize(config).await?.run(command).await?;

    Ok(())
}
