//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的命令行结构。
//! 根据给出的参数，一次调用只执行一种操作，见 [`Action`]。

use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

/// 在无损格式图像 (如 PNG, BMP) 的最低有效位中隐藏消息或文件，或者把它们揭示出来。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "在无损格式图像 (如 PNG, BMP) 的最低有效位中隐藏消息或文件，或者把它们揭示出来。\n不带 -m、-f、-r 时，揭示图像中隐藏的消息。"
)]
pub struct Cli {
    /// 要隐藏数据的图像，或者要从中揭示数据的图像。
    pub input: PathBuf,

    /// 要隐藏在输入图像中的消息。
    #[arg(short, long, conflicts_with_all = ["file", "reveal"])]
    pub message: Option<String>,

    /// 要隐藏在输入图像中的文件。
    #[arg(short, long, conflicts_with = "reveal")]
    pub file: Option<PathBuf>,

    /// 隐藏时为输出图像的路径，揭示时为输出文件的路径。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 揭示图像中隐藏的文件。
    #[arg(short, long)]
    pub reveal: bool,

    /// 图像容量不足时报错，而不是截断数据。
    #[arg(long)]
    pub strict: bool,

    /// 输出更多日志，可重复 (-vv)。
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// 一次调用要执行的操作。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    HideMessage(String),
    HideFile(PathBuf),
    RevealFile,
    RevealMessage,
}

impl Cli {
    pub fn action(&self) -> Action {
        match (&self.message, &self.file) {
            (Some(message), _) => Action::HideMessage(message.clone()),
            (None, Some(file)) => Action::HideFile(file.clone()),
            (None, None) if self.reveal => Action::RevealFile,
            (None, None) => Action::RevealMessage,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}
