// receipt-generation-service/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReceiptError>;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error (status {status}): {body}")]
    SheetsApi { status: u16, body: String },

    #[error("Drive API error (status {status}): {body}")]
    DriveApi { status: u16, body: String },

    #[error("Docs API error (status {status}): {body}")]
    DocsApi { status: u16, body: String },

    #[error("Directory empty or not found")]
    DirectoryEmpty,

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ReceiptError {
    /// Stable machine-readable kind, used in structured log events.
    pub fn kind(&self) -> &'static str {
        match self {
            ReceiptError::Http(_) => "http_error",
            ReceiptError::SheetsApi { .. } => "sheets_api_error",
            ReceiptError::DriveApi { .. } => "drive_api_error",
            ReceiptError::DocsApi { .. } => "docs_api_error",
            ReceiptError::DirectoryEmpty => "directory_empty",
            ReceiptError::Prompt(_) => "prompt_error",
            ReceiptError::InvalidInput(_) => "invalid_input",
        }
    }
}
