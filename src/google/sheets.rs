// receipt-generation-service/src/google/sheets.rs

use crate::error::{ReceiptError, Result};
use serde::Deserialize;

/// Read-only client for the Sheets values API.
pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ValueRange {
    // Absent when the range holds no data at all.
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// `spreadsheets.values.get`: fetch the cell grid for a range such as
    /// `Foglio1!A:Z`. An empty range yields an empty grid, not an error.
    pub async fn values_get(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, spreadsheet_id, range
        );

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReceiptError::SheetsApi {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let range: ValueRange = response.json().await?;
        Ok(range.values)
    }
}
