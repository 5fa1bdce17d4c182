use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::landmarks::{self, AnnotateResponse};
use super::Detection;
use crate::error::{Error, Result};

const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability the orchestrator needs from a detection backend: encoded image
/// bytes in, per-face landmark sets out. One call per request, no retries.
pub trait FaceDetector {
    async fn detect(&self, image: &[u8]) -> Result<Detection>;
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<DetectRequest>,
}

#[derive(Debug, Serialize)]
struct DetectRequest {
    image: RequestImage,
    features: Vec<RequestFeature>,
}

#[derive(Debug, Serialize)]
struct RequestImage {
    content: String,
}

#[derive(Debug, Serialize)]
struct RequestFeature {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// REST annotate backend. Holds a connection pool, so clone instead of
/// rebuilding one per request.
#[derive(Debug, Clone)]
pub struct VisionClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl VisionClient {
    pub fn new(api_key: String) -> Result<VisionClient> {
        VisionClient::with_endpoint(DEFAULT_ENDPOINT.to_string(), api_key)
    }

    pub fn with_endpoint(endpoint: String, api_key: String) -> Result<VisionClient> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::ServiceUnavailable)?;

        Ok(VisionClient {
            http,
            endpoint,
            api_key,
        })
    }
}

impl FaceDetector for VisionClient {
    async fn detect(&self, image: &[u8]) -> Result<Detection> {
        let request = AnnotateRequest {
            requests: vec![DetectRequest {
                image: RequestImage {
                    content: BASE64.encode(image),
                },
                features: vec![RequestFeature {
                    kind: "FACE_DETECTION",
                }],
            }],
        };

        debug!(bytes = image.len(), "posting annotate request");
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(Error::ServiceUnavailable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServiceError(format!("{status}: {body}")));
        }

        let parsed: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| Error::ServiceError(format!("unparseable response: {e}")))?;

        landmarks::into_detection(parsed)
    }
}
