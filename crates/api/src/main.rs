use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use congestiq_core::domain::inputs::{SafetyInputs, TrafficInputs};
use congestiq_core::domain::risk::RiskTier;
use congestiq_core::domain::score;
use congestiq_core::weather::cache::CachedWeatherProvider;
use congestiq_core::weather::error::{LookupErrorKind, WeatherLookupError};
use congestiq_core::weather::provider::{OpenWeatherClient, WeatherProvider};
use congestiq_core::weather::types::WeatherSnapshot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = congestiq_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let provider: Option<Arc<CachedWeatherProvider<OpenWeatherClient>>> =
        match OpenWeatherClient::from_settings(&settings) {
            Ok(client) => Some(Arc::new(CachedWeatherProvider::new(client))),
            Err(e) => {
                sentry_anyhow::capture_anyhow(&e);
                tracing::error!(error = %e, "weather provider unavailable; starting API in degraded mode");
                None
            }
        };

    let state = AppState { provider };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/assessments", post(create_assessment))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    provider: Option<Arc<CachedWeatherProvider<OpenWeatherClient>>>,
}

#[derive(Debug, Deserialize)]
struct AssessmentRequest {
    city: String,
    traffic: TrafficInputs,
    safety: SafetyInputs,
}

#[derive(Debug, Serialize)]
struct AssessmentResponse {
    city: String,
    weather: WeatherSnapshot,
    traffic_risk: i64,
    weather_risk: i64,
    safety_risk: i64,
    congestion_pct: u8,
    tier: RiskTier,
    actions: Vec<&'static str>,
}

async fn create_assessment(
    State(state): State<AppState>,
    Json(req): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, StatusCode> {
    let Some(provider) = &state.provider else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    if req.city.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if req.traffic.validate().is_err() || req.safety.validate().is_err() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let weather = provider.fetch_current(&req.city).await.map_err(|e| {
        match e.downcast_ref::<WeatherLookupError>() {
            Some(lookup) if lookup.kind == LookupErrorKind::NotFound => StatusCode::NOT_FOUND,
            _ => {
                sentry_anyhow::capture_anyhow(&e);
                tracing::error!(city = %req.city, error = %e, "weather lookup failed");
                StatusCode::BAD_GATEWAY
            }
        }
    })?;

    let breakdown = score::evaluate(&weather, &req.traffic, &req.safety);

    Ok(Json(AssessmentResponse {
        city: req.city,
        weather,
        traffic_risk: breakdown.traffic_risk as i64,
        weather_risk: breakdown.weather_risk as i64,
        safety_risk: breakdown.safety_risk as i64,
        congestion_pct: breakdown.congestion_pct,
        tier: breakdown.tier,
        actions: breakdown.actions,
    }))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &congestiq_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
