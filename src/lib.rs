//! # steganographer 库
//!
//! 在无损图像的最低有效位中隐藏消息或文件，并能无损地取回。
//! 数据之前带有一个自描述的头部，揭示时无需任何额外信息。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod header;
pub mod image_adapter;
pub mod steganographer;
pub mod steganography;

pub use error::{Result, StegError};
pub use header::{Header, HeaderError};
pub use steganographer::{CapacityPolicy, Revealed, Steganographer};
