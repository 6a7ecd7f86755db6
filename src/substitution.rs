// receipt-generation-service/src/substitution.rs

use crate::directory::{ContactRecord, COL_ADDRESS, COL_EMAIL, COL_NAME, COL_PEC, COL_TAX_CODE};
use crate::models::DocumentRequest;
use chrono::NaiveDate;

pub const TOKEN_NAME: &str = "{NOME}";
pub const TOKEN_ADDRESS: &str = "{INDIRIZZO}";
pub const TOKEN_TAX_CODE: &str = "{CF}";
pub const TOKEN_EMAIL: &str = "{EMAIL}";
pub const TOKEN_PEC: &str = "{PEC}";
pub const TOKEN_AMOUNT: &str = "{IMPORTO}";
pub const TOKEN_EVENT: &str = "{EVENTO}";
pub const TOKEN_LOCATION: &str = "{LUOGO}";
pub const TOKEN_EVENT_DATE: &str = "{DATA_EVENTO}";
pub const TOKEN_RECEIPT_DATE: &str = "{DATA_RICEVUTA}";
pub const TOKEN_NUMBER: &str = "{NUMERO}";

/// Every placeholder token the templates may contain. Each generation
/// produces a value for all of them; tokens missing from a template are
/// simply never matched by the remote replace call.
pub const TOKENS: [&str; 11] = [
    TOKEN_NAME,
    TOKEN_ADDRESS,
    TOKEN_TAX_CODE,
    TOKEN_EMAIL,
    TOKEN_PEC,
    TOKEN_AMOUNT,
    TOKEN_EVENT,
    TOKEN_LOCATION,
    TOKEN_EVENT_DATE,
    TOKEN_RECEIPT_DATE,
    TOKEN_NUMBER,
];

/// Amounts always render with exactly two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Dates always render zero-padded `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Ordered token→value pairs for one generation. Tokens are replaced as
/// literal text (not regexes), matched case-sensitively by the Docs API.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionMap {
    pairs: Vec<(String, String)>,
}

impl SubstitutionMap {
    /// Merge contact fields and form fields into values for all eleven
    /// tokens. Contact columns absent from the sheet resolve to `""`.
    pub fn build(contact: &ContactRecord, request: &DocumentRequest) -> Self {
        let pairs = vec![
            (TOKEN_NAME, contact.get_or_empty(COL_NAME).to_string()),
            (TOKEN_ADDRESS, contact.get_or_empty(COL_ADDRESS).to_string()),
            (TOKEN_TAX_CODE, contact.get_or_empty(COL_TAX_CODE).to_string()),
            (TOKEN_EMAIL, contact.get_or_empty(COL_EMAIL).to_string()),
            (TOKEN_PEC, contact.get_or_empty(COL_PEC).to_string()),
            (TOKEN_AMOUNT, format_amount(request.amount)),
            (TOKEN_EVENT, request.event.clone().unwrap_or_default()),
            (TOKEN_LOCATION, request.location.clone()),
            (TOKEN_EVENT_DATE, format_date(request.event_date)),
            (TOKEN_RECEIPT_DATE, format_date(request.receipt_date)),
            (TOKEN_NUMBER, request.receipt_number.clone()),
        ];

        Self {
            pairs: pairs
                .into_iter()
                .map(|(token, value)| (token.to_string(), value))
                .collect(),
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
