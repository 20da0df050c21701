use crate::utils::error::{PortalError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

pub const PROBLEM_STATEMENTS: [&str; 3] = [
    "Bone Age Prediction",
    "Cataract Detection",
    "Diabetic Retinopathy",
];

// The portal backend expects the short category codes.
fn short_code(problem_statement: &str) -> &str {
    match problem_statement {
        "Bone Age Prediction" => "BAP",
        "Cataract Detection" => "CD",
        "Diabetic Retinopathy" => "DR",
        other => other,
    }
}

/// A solution archive submission, posted as a multipart form.
#[derive(Debug, Clone, Default)]
pub struct SolutionSubmission {
    pub team_number: String,
    pub team_name: String,
    pub problem_statement: String,
    pub used_library: String,
    /// Free-text library name, required when `used_library` is "Others".
    pub used_library_other: String,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

impl SolutionSubmission {
    pub fn validate(&self) -> Result<()> {
        if self.team_number.trim().is_empty() {
            return Err(PortalError::ValidationError {
                message: "Please enter a team number".to_string(),
            });
        }
        if self.team_name.trim().is_empty() {
            return Err(PortalError::ValidationError {
                message: "Please enter a team name".to_string(),
            });
        }
        if self.problem_statement.is_empty() {
            return Err(PortalError::ValidationError {
                message: "Please select a problem statement".to_string(),
            });
        }
        if self.used_library.is_empty() {
            return Err(PortalError::ValidationError {
                message: "Please select or enter a used library".to_string(),
            });
        }
        if self.used_library == "Others" && self.used_library_other.trim().is_empty() {
            return Err(PortalError::ValidationError {
                message: "Please enter the library name".to_string(),
            });
        }
        if self.file_name.is_empty() || self.file_bytes.is_empty() {
            return Err(PortalError::ValidationError {
                message: "Please upload a file".to_string(),
            });
        }
        let file_name = self.file_name.to_lowercase();
        if !file_name.ends_with(".tar.gz") && !file_name.ends_with(".tgz") {
            return Err(PortalError::ValidationError {
                message: "Please upload a .tar.gz or .tgz file".to_string(),
            });
        }
        Ok(())
    }

    fn library(&self) -> &str {
        if self.used_library == "Others" {
            &self.used_library_other
        } else {
            &self.used_library
        }
    }

    pub async fn send(&self, client: &Client, endpoint: &str) -> Result<serde_json::Value> {
        self.validate()?;

        let part = Part::bytes(self.file_bytes.clone()).file_name(self.file_name.clone());
        let form = Form::new()
            .text("teamNumber", self.team_number.clone())
            .text("teamName", self.team_name.clone())
            .text(
                "problemStatement",
                short_code(&self.problem_statement).to_string(),
            )
            .text("usedLibrary", self.library().to_string())
            .part("file", part);

        tracing::debug!("Posting solution submission to: {}", endpoint);
        let response = client.post(endpoint).multipart(form).send().await?;
        tracing::debug!("Submission response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PortalError::ProcessingError {
                message: format!("Server error: {}", response.status().as_u16()),
            });
        }

        Ok(response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({})))
    }
}
