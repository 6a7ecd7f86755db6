// receipt-generation-service/src/models.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two document kinds the tool can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    /// Receipt for a contribution the organisation received.
    Received,
    /// Declaration for a contribution the organisation paid out.
    Paid,
}

impl ContributionKind {
    /// Italian display label, also used in the generated file name.
    pub fn label(&self) -> &'static str {
        match self {
            ContributionKind::Received => "Ricevuta di contributo ricevuto",
            ContributionKind::Paid => "Dichiarazione di contributo versato",
        }
    }

    pub const ALL: [ContributionKind; 2] = [ContributionKind::Received, ContributionKind::Paid];
}

impl std::fmt::Display for ContributionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the user supplies for one generation, besides the contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub kind: ContributionKind,
    /// Non-negative amount in euro.
    pub amount: f64,
    pub location: String,
    /// Optional; renders as an empty string when absent.
    pub event: Option<String>,
    pub receipt_number: String,
    pub event_date: NaiveDate,
    pub receipt_date: NaiveDate,
}

/// Identifier and canonical edit URL of a generated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLink {
    pub document_id: String,
    pub url: String,
}

impl DocumentLink {
    pub fn new(document_id: String) -> Self {
        let url = format!("https://docs.google.com/document/d/{}/edit", document_id);
        Self { document_id, url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_uses_canonical_edit_url() {
        let link = DocumentLink::new("abc123".to_string());
        assert_eq!(link.url, "https://docs.google.com/document/d/abc123/edit");
    }

    #[test]
    fn kind_labels_are_distinct() {
        assert_ne!(
            ContributionKind::Received.label(),
            ContributionKind::Paid.label()
        );
    }
}
