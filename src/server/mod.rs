//! HTTP surface: image captioning, text keywords and recommendations.

pub mod caption;
pub mod handlers;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::ServiceConfig;
use crate::engine::{KeywordExtractor, Recommender, SharedRecommender};
use crate::lexicon::{Lexicon, TransliterationMap};
use crate::types::LensResult;

pub use caption::{Captioner, FixedCaptioner, HttpCaptioner, UnavailableCaptioner};
pub use handlers::{ApiError, KeywordResponse};

/// Request-independent settings the handlers read.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub allowed_extensions: Vec<String>,
    pub max_upload_bytes: usize,
    pub top_n: usize,
    pub catalog_path: PathBuf,
    pub started_at: DateTime<Utc>,
}

impl ServiceSettings {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
            max_upload_bytes: config.max_upload_bytes,
            top_n: config.top_n,
            catalog_path: config.catalog_path.clone(),
            started_at: Utc::now(),
        }
    }
}

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub extractor: KeywordExtractor,
    pub recommender: Arc<SharedRecommender>,
    pub captioner: Arc<dyn Captioner>,
    pub settings: Arc<ServiceSettings>,
}

impl AppState {
    pub fn new(
        extractor: KeywordExtractor,
        recommender: Recommender,
        captioner: Arc<dyn Captioner>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            extractor,
            recommender: Arc::new(SharedRecommender::new(recommender)),
            captioner,
            settings: Arc::new(settings),
        }
    }

    /// Build every model the service needs. Runs once at startup.
    pub fn from_config(config: &ServiceConfig) -> LensResult<Self> {
        let lexicon = Lexicon::standard(config.thesaurus_path.as_deref())?;
        let extractor = KeywordExtractor::new(
            Arc::new(lexicon),
            Arc::new(TransliterationMap::default()),
        )
        .with_cap(config.keyword_cap);

        let recommender = Recommender::from_csv(&config.catalog_path)?;

        let captioner: Arc<dyn Captioner> = match &config.caption_endpoint {
            Some(endpoint) => Arc::new(HttpCaptioner::new(
                endpoint.clone(),
                Duration::from_secs(config.caption_timeout_secs),
            )?),
            None => {
                log::warn!("No caption endpoint configured; image uploads will fail");
                Arc::new(UnavailableCaptioner)
            }
        };

        Ok(Self::new(
            extractor,
            recommender,
            captioner,
            ServiceSettings::from_config(config),
        ))
    }
}

/// Assemble the router. CORS applies to `/recommend` only; the upload
/// limit applies to `/` only.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin {o:?}");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET]);

    let recommend: Router<AppState> = Router::new()
        .route("/recommend", get(handlers::recommend))
        .layer(cors);

    let upload_limit = DefaultBodyLimit::max(state.settings.max_upload_bytes);

    Router::new()
        .route("/", post(handlers::caption_image).layer(upload_limit))
        .route("/text", post(handlers::text_keywords))
        .route("/health", get(handlers::health))
        .route("/admin/reload", post(handlers::reload_catalog))
        .merge(recommend)
        .with_state(state)
}

/// Build the state from `config` and serve until the process is stopped.
pub async fn serve(config: ServiceConfig) -> LensResult<()> {
    let state = AppState::from_config(&config)?;
    let app = router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    log::info!("product-lens listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
