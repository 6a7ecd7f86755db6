// receipt-generation-service/src/directory.rs

use crate::error::Result;
use crate::google::sheets::SheetsClient;
use async_trait::async_trait;
use tracing::info;

/// Column headers expected in the contact sheet. Only `Nome` is required
/// for naming the generated file; the others fall back to empty strings.
pub const COL_NAME: &str = "Nome";
pub const COL_ADDRESS: &str = "Indirizzo";
pub const COL_TAX_CODE: &str = "Codice Fiscale";
pub const COL_EMAIL: &str = "Email";
pub const COL_PEC: &str = "PEC";

/// Anything that can produce the raw cell grid of the contact sheet.
/// First row is the header; rows may be ragged (shorter than the header).
#[async_trait]
pub trait SpreadsheetSource: Send + Sync {
    async fn fetch_values(&self) -> Result<Vec<Vec<String>>>;
}

/// `SpreadsheetSource` backed by the Sheets values API for a fixed
/// spreadsheet and sheet tab, always reading columns A:Z.
pub struct SheetsDirectorySource {
    client: SheetsClient,
    spreadsheet_id: String,
    range: String,
}

impl SheetsDirectorySource {
    pub fn new(client: SheetsClient, spreadsheet_id: String, sheet_name: &str) -> Self {
        Self {
            client,
            spreadsheet_id,
            range: format!("{}!A:Z", sheet_name),
        }
    }
}

#[async_trait]
impl SpreadsheetSource for SheetsDirectorySource {
    async fn fetch_values(&self) -> Result<Vec<Vec<String>>> {
        self.client.values_get(&self.spreadsheet_id, &self.range).await
    }
}

/// One row of the directory: header→value pairs in sheet column order,
/// plus the row's stable index within the directory. Selection resolves
/// by this index, never by display name, so duplicate names stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    index: usize,
    fields: Vec<(String, String)>,
    haystack: String,
}

impl ContactRecord {
    fn new(index: usize, header: &[String], row: &[String]) -> Self {
        let fields: Vec<(String, String)> = header
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let value = row.get(i).cloned().unwrap_or_default();
                (col.clone(), value)
            })
            .collect();

        let haystack = fields
            .iter()
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Self {
            index,
            fields,
            haystack,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of a column, if the sheet has it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(col, _)| col == column)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a column, empty string when absent.
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.get_or_empty(COL_NAME)
    }

    /// All cell values concatenated and lowercased, for substring search.
    pub fn haystack(&self) -> &str {
        &self.haystack
    }
}

/// The loaded contact table. Immutable once built; rebuilt on refresh.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    records: Vec<ContactRecord>,
}

impl Directory {
    /// Build from the raw cell grid. The first row is the header; an empty
    /// grid (or a header with no data rows) yields an empty directory.
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        let mut iter = values.into_iter();
        let Some(header) = iter.next() else {
            return Self::default();
        };

        let records = iter
            .enumerate()
            .map(|(index, row)| ContactRecord::new(index, &header, &row))
            .collect();

        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ContactRecord> {
        self.records.get(index)
    }

    /// First record whose `Nome` equals `name` exactly, in table order.
    /// Deterministic under duplicate names; prefer index-based selection.
    pub fn first_by_name(&self, name: &str) -> Option<&ContactRecord> {
        self.records.iter().find(|r| r.name() == name)
    }
}

/// Single-slot directory cache. The directory is fetched once per process
/// and reused until `refresh` is called explicitly.
#[derive(Default)]
pub struct DirectoryCache {
    slot: Option<Directory>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.is_some()
    }

    /// Return the cached directory, fetching it on first use.
    pub async fn get_or_load(&mut self, source: &dyn SpreadsheetSource) -> Result<&Directory> {
        if self.slot.is_none() {
            self.refresh(source).await?;
        }
        Ok(self.slot.as_ref().expect("slot populated by refresh"))
    }

    /// Drop the cached directory and fetch a fresh copy.
    pub async fn refresh(&mut self, source: &dyn SpreadsheetSource) -> Result<()> {
        let values = source.fetch_values().await?;
        let directory = Directory::from_values(values);

        info!(rows = directory.len(), "Directory loaded");

        self.slot = Some(directory);
        Ok(())
    }
}
