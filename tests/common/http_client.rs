//! Typed client for the Credence HTTP API.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One `/predict` submission. Fields left as `None` are not sent at all.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub text: Option<String>,
    pub source: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl Submission {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn image(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            image: Some(bytes.into()),
            ..Default::default()
        }
    }

    pub fn from_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    fn to_form(&self) -> Form {
        let mut form = Form::new();
        if let Some(text) = &self.text {
            form = form.text("text", text.clone());
        }
        if let Some(source) = &self.source {
            form = form.text("source", source.clone());
        }
        if let Some(image) = &self.image {
            form = form.part("image", Part::bytes(image.clone()).file_name("upload.png"));
        }
        form
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Score {
    pub extracted_text: String,
    pub prob_fake: f64,
    pub pred_label: u8,
    pub final_score: f64,
}

/// A decoded `/predict` reply.
#[derive(Debug)]
pub struct Reply {
    pub http_status: u16,
    /// Value of the `x-credence-status` header.
    pub credence_status: String,
    pub body: serde_json::Value,
}

impl Reply {
    pub fn score(&self) -> Score {
        assert_eq!(self.http_status, 200, "unexpected reply: {:?}", self.body);
        serde_json::from_value(self.body.clone()).expect("body should be a score")
    }

    pub fn is_no_text(&self) -> bool {
        self.http_status == 200 && self.body == serde_json::json!({"error": "No text found"})
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Components {
    pub embedder_mode: String,
    pub device: String,
    pub embedding_dim: usize,
    pub classifier_dim: usize,
    pub ocr: String,
    pub trusted_domains: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Readiness {
    pub status: String,
    pub components: Components,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("http client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn predict(&self, submission: &Submission) -> reqwest::Result<Reply> {
        let resp = self
            .http
            .post(self.endpoint("predict"))
            .multipart(submission.to_form())
            .send()
            .await?;

        let http_status = resp.status().as_u16();
        let credence_status = resp
            .headers()
            .get("x-credence-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = resp.json().await?;

        Ok(Reply {
            http_status,
            credence_status,
            body,
        })
    }

    pub async fn healthz(&self) -> reqwest::Result<serde_json::Value> {
        self.http
            .get(self.endpoint("healthz"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn ready(&self) -> reqwest::Result<Readiness> {
        self.http
            .get(self.endpoint("ready"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
