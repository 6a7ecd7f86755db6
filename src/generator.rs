// receipt-generation-service/src/generator.rs

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::{DriveConfig, TemplateConfig};
use crate::directory::ContactRecord;
use crate::error::Result;
use crate::google::{DocsClient, DriveClient};
use crate::models::{ContributionKind, DocumentLink, DocumentRequest};
use crate::substitution::SubstitutionMap;

/// Orchestrates one generation: pick template → copy into the target
/// folder → replace tokens → return the document link.
///
/// The two external calls have no transactional guarantee between them;
/// when the substitution fails, the freshly made copy is deleted so no
/// orphaned document lingers in the folder. That delete is best-effort.
pub struct DocumentGenerator {
    drive: DriveClient,
    docs: DocsClient,
    received_template_id: String,
    paid_template_id: String,
    folder_id: String,
}

impl DocumentGenerator {
    pub fn new(
        drive: DriveClient,
        docs: DocsClient,
        templates: &TemplateConfig,
        drive_config: &DriveConfig,
    ) -> Self {
        Self {
            drive,
            docs,
            received_template_id: templates.received_id.clone(),
            paid_template_id: templates.paid_id.clone(),
            folder_id: drive_config.folder_id.clone(),
        }
    }

    fn template_id(&self, kind: ContributionKind) -> &str {
        match kind {
            ContributionKind::Received => &self.received_template_id,
            ContributionKind::Paid => &self.paid_template_id,
        }
    }

    /// Display name for the copy: underscored kind label, contact name,
    /// receipt date in ISO form.
    pub fn file_name(contact: &ContactRecord, request: &DocumentRequest) -> String {
        format!(
            "{}_{}_{}",
            request.kind.label().replace(' ', "_"),
            contact.name(),
            request.receipt_date
        )
    }

    #[instrument(skip(self, contact, request), fields(kind = %request.kind, contact_row = contact.index()))]
    pub async fn generate(
        &self,
        contact: &ContactRecord,
        request: &DocumentRequest,
    ) -> Result<DocumentLink> {
        let request_id = Uuid::new_v4();
        let template_id = self.template_id(request.kind);
        let name = Self::file_name(contact, request);

        info!(
            request_id = %request_id,
            template_id = %template_id,
            name = %name,
            "Copying template"
        );

        let document_id = self
            .drive
            .copy_file(template_id, &name, &self.folder_id)
            .await?;

        let substitutions = SubstitutionMap::build(contact, request);

        if let Err(e) = self
            .docs
            .replace_all_text(&document_id, substitutions.pairs())
            .await
        {
            error!(
                request_id = %request_id,
                document_id = %document_id,
                error = %e,
                "Token substitution failed, deleting orphaned copy"
            );
            if let Err(delete_err) = self.drive.delete_file(&document_id).await {
                warn!(
                    document_id = %document_id,
                    error = %delete_err,
                    "Failed to delete orphaned copy, continuing"
                );
            }
            return Err(e);
        }

        info!(
            request_id = %request_id,
            document_id = %document_id,
            replacements = substitutions.len(),
            "Document generated"
        );

        Ok(DocumentLink::new(document_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Directory;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn contact() -> Directory {
        Directory::from_values(vec![
            vec!["Nome".to_string(), "Email".to_string()],
            vec!["Mario Rossi".to_string(), "mario@example.com".to_string()],
        ])
    }

    fn request(kind: ContributionKind) -> DocumentRequest {
        DocumentRequest {
            kind,
            amount: 50.0,
            location: "Milano".to_string(),
            event: None,
            receipt_number: "7".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            receipt_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        }
    }

    fn generator(server: &MockServer) -> DocumentGenerator {
        let drive = DriveClient::new(server.uri(), "tok".to_string());
        let docs = DocsClient::new(server.uri(), "tok".to_string());
        DocumentGenerator::new(
            drive,
            docs,
            &crate::config::TemplateConfig {
                received_id: "tpl-received".to_string(),
                paid_id: "tpl-paid".to_string(),
            },
            &crate::config::DriveConfig {
                folder_id: "folder-1".to_string(),
            },
        )
    }

    #[test]
    fn file_name_underscores_the_kind_label_only() {
        let dir = contact();

        assert_eq!(
            DocumentGenerator::file_name(dir.get(0).unwrap(), &request(ContributionKind::Received)),
            "Ricevuta_di_contributo_ricevuto_Mario Rossi_2024-03-09"
        );
    }

    #[tokio::test]
    async fn each_kind_copies_its_own_template() {
        for (kind, template) in [
            (ContributionKind::Received, "tpl-received"),
            (ContributionKind::Paid, "tpl-paid"),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(format!("/drive/v3/files/{template}/copy")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "copy-1" })))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .and(path("/v1/documents/copy-1:batchUpdate"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .expect(1)
                .mount(&server)
                .await;

            let dir = contact();
            let link = generator(&server)
                .generate(dir.get(0).unwrap(), &request(kind))
                .await
                .unwrap();

            assert_eq!(link.document_id, "copy-1");
            assert_eq!(link.url, "https://docs.google.com/document/d/copy-1/edit");
        }
    }

    #[tokio::test]
    async fn substitution_batch_targets_the_new_copy() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/drive/v3/files/tpl-received/copy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "copy-2" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/documents/copy-2:batchUpdate"))
            .and(body_partial_json(json!({
                "requests": [
                    { "replaceAllText": {
                        "containsText": { "text": "{NOME}", "matchCase": true },
                        "replaceText": "Mario Rossi"
                    }}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = contact();
        generator(&server)
            .generate(dir.get(0).unwrap(), &request(ContributionKind::Received))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_substitution_deletes_the_orphaned_copy() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/drive/v3/files/tpl-received/copy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "copy-3" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/documents/copy-3:batchUpdate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/drive/v3/files/copy-3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let dir = contact();
        let err = generator(&server)
            .generate(dir.get(0).unwrap(), &request(ContributionKind::Received))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            crate::error::ReceiptError::DocsApi { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn failed_copy_propagates_without_touching_docs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/drive/v3/files/tpl-paid/copy"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let dir = contact();
        let err = generator(&server)
            .generate(dir.get(0).unwrap(), &request(ContributionKind::Paid))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            crate::error::ReceiptError::DriveApi { status: 403, .. }
        ));
        // No batchUpdate or delete was mounted; any such call would 404
        // and the mock server's expectations stay satisfied.
    }
}
