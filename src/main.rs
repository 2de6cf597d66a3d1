use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

mod api {
    pub mod openai;
    pub mod vapi_dtos;
    pub mod vapi_endpoints;
}
mod assistants {
    pub mod cache;
    pub mod provisioner;
    pub mod templates;
}

use api::openai::PromptClient;
use api::vapi_endpoints;
use assistants::cache::AssistantCache;
use assistants::provisioner::AssistantProvisioner;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    assistant_cache: Arc<AssistantCache>,
    provisioner: AssistantProvisioner,
    // The platform number callers dialed; every assistant transfers back to
    // it so the next leg of the call gets re-routed through us.
    vapi_phone_number: String,
    vapi_secret: Option<String>,
}

pub fn validate_env() {
    let _ = std::env::var("VAPI_PHONE_NUMBER").expect("VAPI_PHONE_NUMBER must be set");
    let _ = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set");
}

pub fn app(state: Arc<AppState>) -> Router {
    let vapi_routes = Router::new()
        .route("/api/v1/vapi/webhook", post(vapi_endpoints::handle_webhook))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            vapi_endpoints::validate_vapi_secret,
        ));

    Router::new()
        .route("/api/health", get(health_check))
        .merge(vapi_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    validate_env();

    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let vapi_phone_number =
        std::env::var("VAPI_PHONE_NUMBER").expect("VAPI_PHONE_NUMBER must be set");
    let openai_api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set");
    let openai_base_url = std::env::var("OPENAI_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
    let vapi_secret = std::env::var("VAPI_SERVER_URL_SECRET").ok();
    let cache_capacity = std::env::var("ASSISTANT_CACHE_CAPACITY")
        .ok()
        .and_then(|v| v.parse().ok());

    let assistant_cache = Arc::new(AssistantCache::new(cache_capacity));
    let provisioner = AssistantProvisioner::new(
        assistant_cache.clone(),
        PromptClient::new(&openai_base_url, &openai_api_key),
    );

    let state = Arc::new(AppState {
        assistant_cache,
        provisioner,
        vapi_phone_number,
        vapi_secret,
    });

    use tokio::net::TcpListener;

    let listener = TcpListener::bind("0.0.0.0:3003").await.unwrap();
    axum::serve(listener, app(state).into_make_service()).await.unwrap();
}
