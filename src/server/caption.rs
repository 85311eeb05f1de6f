//! Image-to-text collaborators. The model itself lives behind an HTTP endpoint.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::Value;

use crate::types::{LensError, LensResult};

/// Boxed future returned by [`Captioner::caption`].
pub type CaptionFuture<'a> = Pin<Box<dyn Future<Output = LensResult<String>> + Send + 'a>>;

/// Produces a natural-language description of an image.
pub trait Captioner: Send + Sync {
    fn caption<'a>(&'a self, image: &'a [u8]) -> CaptionFuture<'a>;
}

/// Posts raw image bytes to an inference endpoint.
///
/// Accepts `[{"generated_text": ...}]` (pipeline style) or
/// `{"generated_text": ...}` responses.
pub struct HttpCaptioner {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCaptioner {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> LensResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LensError::Caption(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Captioner for HttpCaptioner {
    fn caption<'a>(&'a self, image: &'a [u8]) -> CaptionFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .post(&self.endpoint)
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(image.to_vec())
                .send()
                .await
                .map_err(|e| LensError::Caption(format!("Caption request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                return Err(LensError::Caption(format!(
                    "Caption service returned {status}"
                )));
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| LensError::Caption(format!("Unreadable caption response: {e}")))?;
            generated_text(&body)
                .ok_or_else(|| LensError::Caption("Response has no generated_text".to_string()))
        })
    }
}

/// Extract the caption from either supported response shape.
pub fn generated_text(body: &Value) -> Option<String> {
    let entry = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    entry
        .get("generated_text")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}

/// Used when no caption endpoint is configured; every call fails.
#[derive(Debug, Default)]
pub struct UnavailableCaptioner;

impl Captioner for UnavailableCaptioner {
    fn caption<'a>(&'a self, _image: &'a [u8]) -> CaptionFuture<'a> {
        Box::pin(async {
            Err(LensError::Caption(
                "No caption endpoint configured".to_string(),
            ))
        })
    }
}

/// Returns the same caption for every image.
#[derive(Debug, Clone)]
pub struct FixedCaptioner {
    caption: String,
}

impl FixedCaptioner {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
        }
    }
}

impl Captioner for FixedCaptioner {
    fn caption<'a>(&'a self, _image: &'a [u8]) -> CaptionFuture<'a> {
        let caption = self.caption.clone();
        Box::pin(async move { Ok(caption) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_response_shapes_are_understood() {
        let pipeline = serde_json::json!([{"generated_text": " a black phone on a desk "}]);
        assert_eq!(
            generated_text(&pipeline).as_deref(),
            Some("a black phone on a desk")
        );
        let single = serde_json::json!({"generated_text": "a laptop"});
        assert_eq!(generated_text(&single).as_deref(), Some("a laptop"));
        assert_eq!(generated_text(&serde_json::json!([])), None);
        assert_eq!(generated_text(&serde_json::json!({"label": "x"})), None);
    }
}
