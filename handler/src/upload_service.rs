use crate::config::UploadConfig;
use crate::error::Result;
use crate::models::*;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use url::Url;

pub struct UploadService {
    client: Client,
    endpoint: Url,
}

impl UploadService {
    pub fn new(config: &UploadConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: config.endpoint()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Uploads one file and settles on an outcome. Never retries.
    pub async fn classify(&self, request: UploadRequest) -> UploadOutcome {
        let filename = request.filename.clone();

        match self.send(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::debug!("Upload of {} failed in transport: {}", filename, e);
                UploadOutcome::Failure(ErrorInfo::transport(e))
            }
        }
    }

    async fn send(&self, request: UploadRequest) -> anyhow::Result<UploadOutcome> {
        log::info!(
            "Uploading {} ({} bytes) to {}",
            request.filename,
            request.bytes.len(),
            self.endpoint
        );

        let form = Form::new().part(FILE_FIELD, Self::build_part(request)?);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        log::debug!("Classify endpoint answered {}", status);

        if status.is_success() {
            let result: ClassificationResult = serde_json::from_value(body)?;
            Ok(UploadOutcome::Success(result))
        } else {
            let error = match body {
                Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
                _ => ErrorResult::default(),
            };
            Ok(UploadOutcome::Failure(ErrorInfo::application(
                status.as_u16(),
                &error,
            )))
        }
    }

    fn build_part(request: UploadRequest) -> anyhow::Result<Part> {
        let part = Part::bytes(request.bytes).file_name(request.filename);

        match request.content_type {
            Some(content_type) => Ok(part.mime_str(&content_type)?),
            None => Ok(part),
        }
    }
}
