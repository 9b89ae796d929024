//! # 命令处理逻辑模块
//!
//! 根据命令行参数选择操作，负责读写文件、调用隐写流程以及向用户报告结果。

use crate::cli::{Action, Cli};
use crate::constants::{FALLBACK_FILE_NAME, MESSAGE_FALLBACK_SUFFIX};
use crate::error::StegError;
use crate::steganographer::{CapacityPolicy, Revealed, Steganographer};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 执行命令行指定的操作。
///
/// 图像中没有隐藏消息不算错误，只会提示用户。
///
/// # Errors
///
/// 读取或写入文件失败、图像无法解码或编码时返回错误。
pub fn run(cli: Cli) -> Result<()> {
    let policy = if cli.strict {
        CapacityPolicy::Reject
    } else {
        CapacityPolicy::Truncate
    };
    let stegs = Steganographer::new().with_policy(policy);
    let output = cli.output.as_deref();

    match cli.action() {
        Action::HideMessage(message) => handle_hide_message(&stegs, &cli.input, &message, output),
        Action::HideFile(file) => handle_hide_file(&stegs, &cli.input, &file, output),
        Action::RevealFile => handle_reveal_file(&stegs, &cli.input, output),
        Action::RevealMessage => handle_reveal_message(&stegs, &cli.input, output),
    }
}

/// 把消息藏入 `input`，输出路径缺省时为 `<input>Steganogrified.png`。
pub fn handle_hide_message(
    stegs: &Steganographer,
    input: &Path,
    message: &str,
    output: Option<&Path>,
) -> Result<()> {
    let hidden = stegs.hide_message(input, message, output).with_context(|| {
        format!(
            "Failed to hide the message in {}",
            input.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been hidden in {}",
        hidden.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 把文件藏入 `input`，输出路径缺省时为 `<input>Steganogrified.png`。
pub fn handle_hide_file(
    stegs: &Steganographer,
    input: &Path,
    file: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let hidden = stegs.hide_file(input, file, output).with_context(|| {
        format!(
            "Failed to hide {} in {}",
            file.to_string_lossy().red().bold(),
            input.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file {} has been hidden in {}",
        file.to_string_lossy().green(),
        hidden.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 揭示隐藏的文件并按原样写出。
///
/// 未指定输出路径时，使用头部记录的文件名，写到输入图像所在的目录。
pub fn handle_reveal_file(stegs: &Steganographer, input: &Path, output: Option<&Path>) -> Result<()> {
    let Some(revealed) = reveal(stegs, input)? else {
        return Ok(());
    };

    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| revealed_file_path(input, &revealed.header.file_name));

    fs::write(&target, &revealed.data).with_context(|| {
        format!(
            "Unable to write revealed file: {}",
            target.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The hidden file was revealed in {}",
        target.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 揭示隐藏的消息。
///
/// 指定了输出路径时写入该文件，否则直接打印。
/// 消息不是合法 UTF-8 时，原始字节被写入输出路径，未指定时写入 `<input>_message.txt`。
pub fn handle_reveal_message(stegs: &Steganographer, input: &Path, output: Option<&Path>) -> Result<()> {
    let Some(revealed) = reveal(stegs, input)? else {
        return Ok(());
    };

    let message = match String::from_utf8(revealed.data) {
        Ok(message) => message,
        Err(err) => {
            let target = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| message_fallback_path(input));
            fs::write(&target, err.as_bytes()).with_context(|| {
                format!(
                    "Unable to write message file: {}",
                    target.to_string_lossy().red().bold()
                )
            })?;

            println!(
                "{} The raw bytes have been written to {}",
                "The hidden message is not valid UTF-8 and cannot be displayed.".yellow(),
                target.to_string_lossy().green().bold()
            );
            return Ok(());
        }
    };

    match output {
        Some(output) => {
            fs::write(output, &message).with_context(|| {
                format!(
                    "Unable to write message file: {}",
                    output.to_string_lossy().red().bold()
                )
            })?;
            println!(
                "The hidden message was written to {}",
                output.to_string_lossy().green().bold()
            );
        }
        None => println!("The hidden message was...\n{message}"),
    }
    Ok(())
}

/// 图像中没有隐藏数据时提示用户并返回 `None`。
fn reveal(stegs: &Steganographer, input: &Path) -> Result<Option<Revealed>> {
    match stegs.reveal(input) {
        Ok(revealed) => {
            info!(
                "Revealed {} bytes from {}",
                revealed.data.len(),
                input.display()
            );
            Ok(Some(revealed))
        }
        Err(StegError::NoHiddenData) => {
            println!(
                "This file {} has no hidden message.",
                input.to_string_lossy().yellow().bold()
            );
            Ok(None)
        }
        Err(err) => Err(err).with_context(|| {
            format!(
                "Failed to reveal data from {}",
                input.to_string_lossy().red().bold()
            )
        }),
    }
}

/// 只取头部文件名的最后一段，防止写到输入图像所在目录之外。
fn revealed_file_path(input: &Path, file_name: &str) -> PathBuf {
    let name = Path::new(file_name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_FILE_NAME));
    input.with_file_name(name)
}

fn message_fallback_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}{MESSAGE_FALLBACK_SUFFIX}"))
}
