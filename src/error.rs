//! Error types for outline operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 节点句柄已失效（被分离或释放）
    #[error("Invalid outline node: {0}")]
    InvalidNode(String),

    /// 构造替换目标/动作失败，节点保持不变
    #[error("Failed to build replacement: {0}")]
    Construction(String),

    #[error("No active document")]
    NoActiveDocument,

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
