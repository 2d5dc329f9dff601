//! Classification endpoint client.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};

use crate::config::Config;
use crate::error::{LeafscanError, LeafscanResult, UploadFailed};
use crate::types::{ClassificationResult, SelectedFile};

/// Path of the classification endpoint, relative to the API base URL.
pub const CLASSIFY_PATH: &str = "classify";

/// Multipart field name the server reads the image from.
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Anything that can turn an image into a label.
#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, file: &SelectedFile) -> Result<ClassificationResult, UploadFailed>;
}

/// `POST /classify` over HTTP with a single multipart part.
///
/// No timeout and no retries: a hung request only delays the result.
#[derive(Clone, Debug)]
pub struct HttpClassifier {
    client: Client,
    endpoint: Url,
    field_name: String,
}

impl HttpClassifier {
    pub fn new(api_url: &Url, field_name: impl Into<String>) -> LeafscanResult<Self> {
        Ok(Self {
            client: Client::new(),
            endpoint: classify_endpoint(api_url)?,
            field_name: field_name.into(),
        })
    }

    pub fn from_config(config: &Config) -> LeafscanResult<Self> {
        Self::new(&config.api_url, config.field_name.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    fn form_for(&self, file: &SelectedFile) -> Result<Form, UploadFailed> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;
        Ok(Form::new().part(self.field_name.clone(), part))
    }
}

#[async_trait::async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, file: &SelectedFile) -> Result<ClassificationResult, UploadFailed> {
        let form = self.form_for(file)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            name = file.name(),
            size = file.len(),
            "Uploading image"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        parse_response(status, &body)
    }
}

/// Map a status and body to a result.
pub fn parse_response(status: StatusCode, body: &[u8]) -> Result<ClassificationResult, UploadFailed> {
    if !status.is_success() {
        return Err(UploadFailed::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).trim().chars().take(200).collect(),
        });
    }
    ClassificationResult::from_json(body)
}

/// Join the classify path beneath `api_url`, keeping any path prefix.
pub fn classify_endpoint(api_url: &Url) -> LeafscanResult<Url> {
    if api_url.cannot_be_a_base() {
        return Err(LeafscanError::InvalidUrl(api_url.to_string()));
    }
    let mut base = api_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(CLASSIFY_PATH)
        .map_err(|e| LeafscanError::InvalidUrl(e.to_string()))
}
