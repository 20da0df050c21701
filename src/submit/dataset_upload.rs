use crate::domain::model::ProblemType;
use crate::utils::error::{PortalError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// A community dataset contribution, posted as a multipart form.
#[derive(Debug, Clone)]
pub struct DatasetUpload {
    pub submitter_name: String,
    pub dataset_type: ProblemType,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

impl DatasetUpload {
    pub fn validate(&self) -> Result<()> {
        if self.submitter_name.trim().is_empty() {
            return Err(PortalError::ValidationError {
                message: "Please enter your name".to_string(),
            });
        }
        if self.file_name.is_empty() || self.file_bytes.is_empty() {
            return Err(PortalError::ValidationError {
                message: "Please upload a CSV file".to_string(),
            });
        }
        if !self.file_name.to_lowercase().ends_with(".csv") {
            return Err(PortalError::ValidationError {
                message: "Please upload a CSV file only".to_string(),
            });
        }
        Ok(())
    }

    pub async fn send(&self, client: &Client, endpoint: &str) -> Result<serde_json::Value> {
        self.validate()?;

        let part = Part::bytes(self.file_bytes.clone()).file_name(self.file_name.clone());
        let form = Form::new()
            .text("submitterName", self.submitter_name.trim().to_string())
            .text("datasetType", self.dataset_type.to_string())
            .part("file", part);

        tracing::debug!("Posting dataset upload to: {}", endpoint);
        let response = client.post(endpoint).multipart(form).send().await?;
        tracing::debug!("Upload response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PortalError::ProcessingError {
                message: format!("Server error: {}", response.status().as_u16()),
            });
        }

        // The portal answers with JSON; an empty or non-JSON body is fine.
        Ok(response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({})))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn upload() -> DatasetUpload {
        DatasetUpload {
            submitter_name: "Asha Rao".to_string(),
            dataset_type: ProblemType::DR,
            file_name: "fundus.csv".to_string(),
            file_bytes: b"id,grade\n1,2\n".to_vec(),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut u = upload();
        u.submitter_name = "   ".to_string();
        let err = u.validate().unwrap_err();
        assert_eq!(err.user_friendly_message(), "Please enter your name");
    }

    #[test]
    fn test_missing_file_rejected() {
        let mut u = upload();
        u.file_bytes.clear();
        let err = u.validate().unwrap_err();
        assert_eq!(err.user_friendly_message(), "Please upload a CSV file");
    }

    #[test]
    fn test_non_csv_extension_rejected() {
        let mut u = upload();
        u.file_name = "fundus.xlsx".to_string();
        let err = u.validate().unwrap_err();
        assert_eq!(err.user_friendly_message(), "Please upload a CSV file only");
        // Extension check is case-insensitive.
        u.file_name = "FUNDUS.CSV".to_string();
        assert!(u.validate().is_ok());
    }

    #[tokio::test]
    async fn test_send_posts_multipart_form() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/data");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"status": "ok"}));
        });

        let client = Client::new();
        let response = upload().send(&client, &server.url("/data")).await.unwrap();

        api_mock.assert();
        assert_eq!(response["status"], "ok");
    }

    #[tokio::test]
    async fn test_server_error_is_reported_with_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/data");
            then.status(500);
        });

        let client = Client::new();
        let err = upload()
            .send(&client, &server.url("/data"))
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(err.to_string().contains("Server error: 500"));
    }

    #[tokio::test]
    async fn test_empty_response_body_tolerated() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/data");
            then.status(200);
        });

        let client = Client::new();
        let response = upload().send(&client, &server.url("/data")).await.unwrap();
        assert_eq!(response, serde_json::json!({}));
    }
}
