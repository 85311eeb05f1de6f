//! HTTP handlers for captioning, text keywords, and recommendations.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::types::{LensError, Recommendation};

use super::upload::{allowed_file, check_content, extension_of};
use super::AppState;

/// An error body `{"error": message}` with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<LensError> for ApiError {
    fn from(e: LensError) -> Self {
        match e {
            LensError::InvalidImage => Self::bad_request(e.to_string()),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Response for both the image and the text endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordResponse {
    pub description: String,
    pub keywords: Vec<String>,
}

/// `POST /`: caption an uploaded image and extract keywords from the caption.
pub async fn caption_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<KeywordResponse>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::bad_request("No image file provided"))?;

    // An oversized body surfaces here as 413.
    let malformed = |e: MultipartError| {
        ApiError::with_status(e.status(), format!("Malformed multipart body: {}", e.body_text()))
    };

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(malformed)?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or_else(|| ApiError::bad_request("No image file provided"))?;
    if filename.is_empty() {
        return Err(ApiError::bad_request("No selected file"));
    }
    let allowed = &state.settings.allowed_extensions;
    if !allowed_file(&filename, allowed) {
        return Err(ApiError::bad_request(format!(
            "File type not allowed. Allowed types are: {}",
            allowed.join(", ")
        )));
    }
    let kind = check_content(&filename, &bytes).ok_or_else(|| {
        log::debug!("Upload {filename:?} does not carry {:?} content", extension_of(&filename));
        LensError::InvalidImage
    })?;
    log::debug!("Captioning {kind:?} upload {filename:?} ({} bytes)", bytes.len());

    let description = state.captioner.caption(&bytes).await.map_err(|e| {
        log::warn!("Captioning failed for {filename:?}: {e}");
        ApiError::from(e)
    })?;
    let keywords = state.extractor.extract(&description);
    Ok(Json(KeywordResponse {
        description,
        keywords,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub text: Option<String>,
}

/// `POST /text`: keywords for free-form text sent as JSON or form data.
pub async fn text_keywords(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<KeywordResponse>, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let payload = if content_type.starts_with("application/json") {
        Json::<TextPayload>::from_request(request, &state)
            .await
            .map(|Json(p)| p)
            .unwrap_or_default()
    } else if content_type.starts_with("multipart/form-data") {
        text_from_multipart(request, &state).await
    } else {
        Form::<TextPayload>::from_request(request, &state)
            .await
            .map(|Form(p)| p)
            .unwrap_or_default()
    };

    let text = payload.text.filter(|t| !t.is_empty()).ok_or_else(|| {
        ApiError::bad_request(
            "No text provided. Send either JSON with \"text\" field or form data with \"text\" field",
        )
    })?;

    let keywords = state.extractor.extract(&text);
    Ok(Json(KeywordResponse {
        description: text,
        keywords,
    }))
}

async fn text_from_multipart(request: Request, state: &AppState) -> TextPayload {
    let Ok(mut multipart) = Multipart::from_request(request, state).await else {
        return TextPayload::default();
    };
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("text") {
            return TextPayload {
                text: field.text().await.ok(),
            };
        }
    }
    TextPayload::default()
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub product_name: Option<String>,
}

/// `GET /recommend?product_name=...`: diverse similar products.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let name = params
        .product_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Product name is required"))?;

    let recommender = state.recommender.current();
    Ok(Json(recommender.recommend(&name, state.settings.top_n)))
}

/// `GET /health`: liveness plus the sizes of the loaded models.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let recommender = state.recommender.current();
    let (product_types, brands, specifications) = state.extractor.lexicon().counts();
    Json(serde_json::json!({
        "status": "healthy",
        "started_at": state.settings.started_at,
        "products": recommender.catalog().len(),
        "vocabulary": recommender.features().vectorizer().vocabulary_size(),
        "lexicon": {
            "product_types": product_types,
            "brands": brands,
            "specifications": specifications,
        },
    }))
}

/// `POST /admin/reload`: rebuild the recommender from the catalog file.
pub async fn reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shared = state.recommender.clone();
    let path = state.settings.catalog_path.clone();
    let rebuilt = tokio::task::spawn_blocking(move || shared.reload(&path))
        .await
        .map_err(|e| ApiError::internal(format!("Reload task failed: {e}")))??;

    Ok(Json(serde_json::json!({
        "products": rebuilt.catalog().len(),
        "vocabulary": rebuilt.features().vectorizer().vocabulary_size(),
    })))
}
