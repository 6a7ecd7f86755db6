// receipt-generation-service/src/google/drive.rs

use crate::error::{ReceiptError, Result};
use serde::{Deserialize, Serialize};

/// Client for the two Drive operations the tool needs: copying a template
/// and deleting a copy that failed substitution.
pub struct DriveClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for DriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct CopyRequest<'a> {
    name: &'a str,
    parents: [&'a str; 1],
}

#[derive(Deserialize)]
struct FileResource {
    id: String,
}

impl DriveClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// `files.copy`: duplicate `file_id` into `parent_folder_id` under the
    /// given display name, returning the new file's id.
    pub async fn copy_file(
        &self,
        file_id: &str,
        name: &str,
        parent_folder_id: &str,
    ) -> Result<String> {
        let url = format!("{}/drive/v3/files/{}/copy", self.base_url, file_id);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&CopyRequest {
                name,
                parents: [parent_folder_id],
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReceiptError::DriveApi {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let file: FileResource = response.json().await?;
        Ok(file.id)
    }

    /// `files.delete`: remove a file, used to clean up orphaned copies.
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        let url = format!("{}/drive/v3/files/{}", self.base_url, file_id);

        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReceiptError::DriveApi {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn copy_sends_name_and_parent_and_returns_new_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/drive/v3/files/template-1/copy"))
            .and(body_json(json!({
                "name": "Ricevuta_Mario Rossi_2024-03-09",
                "parents": ["folder-1"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "copy-9" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DriveClient::new(server.uri(), "tok".to_string());
        let id = client
            .copy_file("template-1", "Ricevuta_Mario Rossi_2024-03-09", "folder-1")
            .await
            .unwrap();

        assert_eq!(id, "copy-9");
    }

    #[tokio::test]
    async fn copy_failure_maps_to_drive_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("template not found"))
            .mount(&server)
            .await;

        let client = DriveClient::new(server.uri(), "tok".to_string());
        let err = client.copy_file("gone", "x", "folder-1").await.unwrap_err();

        assert!(matches!(err, ReceiptError::DriveApi { status: 404, .. }));
    }

    #[tokio::test]
    async fn delete_targets_the_file_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/drive/v3/files/copy-9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = DriveClient::new(server.uri(), "tok".to_string());
        client.delete_file("copy-9").await.unwrap();
    }
}
