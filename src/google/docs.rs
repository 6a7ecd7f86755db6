// receipt-generation-service/src/google/docs.rs

use crate::error::{ReceiptError, Result};
use serde::Serialize;

/// Client for the Docs `documents.batchUpdate` endpoint.
pub struct DocsClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for DocsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct BatchUpdateBody {
    requests: Vec<UpdateRequest>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest {
    replace_all_text: ReplaceAllText,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplaceAllText {
    contains_text: ContainsText,
    replace_text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainsText {
    text: String,
    match_case: bool,
}

impl DocsClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Replace every literal, case-sensitive occurrence of each token in
    /// one batch transaction. Tokens absent from the document are left
    /// untouched by the API, which is not an error.
    pub async fn replace_all_text(
        &self,
        document_id: &str,
        replacements: &[(String, String)],
    ) -> Result<()> {
        let body = BatchUpdateBody {
            requests: replacements
                .iter()
                .map(|(token, value)| UpdateRequest {
                    replace_all_text: ReplaceAllText {
                        contains_text: ContainsText {
                            text: token.clone(),
                            match_case: true,
                        },
                        replace_text: value.clone(),
                    },
                })
                .collect(),
        };

        let url = format!("{}/v1/documents/{}:batchUpdate", self.base_url, document_id);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReceiptError::DocsApi {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}
