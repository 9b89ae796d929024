use clap::Parser;
use simple_logger::SimpleLogger;

use steganographer::{cli::Cli, handler::run};

/// 程序的主入口点
///
/// 解析命令行参数，按 `-v` 的次数初始化日志，然后执行相应的操作
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new().with_level(cli.log_level()).init()?;

    run(cli)
}
