// receipt-generation-service/src/google/mod.rs

pub mod docs;
pub mod drive;
pub mod sheets;

pub use docs::DocsClient;
pub use drive::DriveClient;
pub use sheets::SheetsClient;
