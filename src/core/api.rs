//! HTTP API for Guardian 360
//!
//! Endpoints:
//! - GET  /health                  - Health check
//! - POST /resolve                 - Resolve a behavior for an audience
//! - POST /advise                  - Match a relationship question
//! - GET  /quote                   - Inspirational quote (never fails)
//! - GET  /principles              - Knowledge-base principles
//! - POST /session/new             - Create session with a family profile
//! - GET  /session/:id             - Session snapshot
//! - DELETE /session/:id           - Drop a session
//! - POST /session/:id/resolve     - Resolve and log to history
//! - POST /session/:id/advise      - Advise and log to history
//! - POST /session/:id/grace       - Set grace level
//! - GET  /session/:id/scripts     - Accountability + unified-front scripts

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::GuardianConfig;
use crate::core::advisor::AdvisoryMatcher;
use crate::core::resolver::{Resolver, ResolverConfig};
use crate::core::scripts::{principles, ScriptSheet};
use crate::core::wisdom::QuoteFetcher;
use crate::types::{
    AdviceResult, AudienceCategory, FamilyProfile, GraceLevel, Principle, QuoteOutcome,
    ReasonCode, ResolutionResult, SessionEvent, SessionState,
};

/// Shared server state
pub struct AppState {
    pub resolver: Resolver,
    pub advisor: AdvisoryMatcher,
    pub quotes: QuoteFetcher,
    pub sessions: RwLock<HashMap<String, SessionState>>,
    next_session: AtomicU64,
}

impl AppState {
    pub fn new(resolver: Resolver, advisor: AdvisoryMatcher, quotes: QuoteFetcher) -> Self {
        Self {
            resolver,
            advisor,
            quotes,
            sessions: RwLock::new(HashMap::new()),
            next_session: AtomicU64::new(1),
        }
    }

    /// Authored tables, matching mode and quote provider from config
    pub fn from_config(config: &GuardianConfig) -> crate::Result<Self> {
        let mode = config.resolver.match_mode;
        Ok(Self::new(
            Resolver::new(ResolverConfig::default(), mode)?,
            AdvisoryMatcher::with_mode(mode)?,
            QuoteFetcher::from_config(&config.quote)?,
        ))
    }

    fn generate_session_id(&self) -> String {
        let seq = self.next_session.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Utc::now().timestamp_millis();
        format!("session_{:x}_{}", stamp, seq)
    }
}

/// Resolve request
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub text: String,
    pub audience: String,
}

/// Resolve response
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub audience: AudienceCategory,
    pub result: ResolutionResult,
    pub reason: ReasonCode,
}

/// Advise request
#[derive(Debug, Deserialize)]
pub struct AdviseRequest {
    pub text: String,
}

/// Advise response
#[derive(Debug, Serialize)]
pub struct AdviseResponse {
    pub result: AdviceResult,
    pub reason: ReasonCode,
}

/// Create session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub parent_role: Option<String>,
    pub partner_name: Option<String>,
}

/// Create session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub caption: String,
}

/// Session snapshot response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub state: SessionState,
    pub safety_overrides: usize,
}

/// Grace level request
#[derive(Debug, Deserialize)]
pub struct GraceRequest {
    pub level: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn not_found(id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("no session '{}'", id),
        }),
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/resolve", post(resolve))
        .route("/advise", post(advise))
        .route("/quote", get(quote))
        .route("/principles", get(get_principles))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/resolve", post(session_resolve))
        .route("/session/:id/advise", post(session_advise))
        .route("/session/:id/grace", post(set_grace))
        .route("/session/:id/scripts", get(get_scripts))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Validate input the resolver itself never checks
fn checked_request(text: &str, audience: &str) -> Result<AudienceCategory, ApiError> {
    if text.trim().is_empty() {
        return Err(bad_request("text must not be empty"));
    }
    audience
        .parse::<AudienceCategory>()
        .map_err(|e| bad_request(e.to_string()))
}

fn checked_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        Err(bad_request("text must not be empty"))
    } else {
        Ok(())
    }
}

async fn resolve(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let audience = checked_request(&req.text, &req.audience)?;
    let result = state.resolver.resolve(&req.text, audience);
    Ok(Json(ResolveResponse {
        audience,
        reason: result.reason(),
        result,
    }))
}

async fn advise(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdviseRequest>,
) -> Result<Json<AdviseResponse>, ApiError> {
    checked_text(&req.text)?;
    let result = state.advisor.advise(&req.text);
    Ok(Json(AdviseResponse {
        reason: result.reason(),
        result,
    }))
}

async fn quote(State(state): State<Arc<AppState>>) -> Json<QuoteOutcome> {
    Json(state.quotes.fetch_quote().await)
}

async fn get_principles() -> Json<Vec<Principle>> {
    Json(principles().to_vec())
}

async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Option<Json<NewSessionRequest>>,
) -> Json<NewSessionResponse> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let defaults = FamilyProfile::default();
    let profile = FamilyProfile::new(
        non_blank(req.parent_role).unwrap_or(defaults.parent_role),
        non_blank(req.partner_name).unwrap_or(defaults.partner_name),
    );

    let session_id = state.generate_session_id();
    let caption = profile.caption();
    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), SessionState::new(profile));
    tracing::info!(session_id = %session_id, "session created");

    Json(NewSessionResponse {
        session_id,
        caption,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| not_found(&id))?;
    Ok(Json(SessionResponse {
        session_id: id.clone(),
        safety_overrides: session.safety_override_count(),
        state: session.clone(),
    }))
}

/// Drop a session and its history
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut sessions = state.sessions.write().await;
    sessions.remove(&id).ok_or_else(|| not_found(&id))?;
    tracing::info!(session_id = %id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fold an event into a stored session
async fn apply_event(state: &AppState, id: &str, event: SessionEvent) -> Result<(), ApiError> {
    let mut sessions = state.sessions.write().await;
    let current = sessions.remove(id).ok_or_else(|| not_found(id))?;
    sessions.insert(id.to_string(), current.reduce(event));
    Ok(())
}

async fn session_resolve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let audience = checked_request(&req.text, &req.audience)?;
    let result = state.resolver.resolve(&req.text, audience);
    apply_event(
        &state,
        &id,
        SessionEvent::Resolved {
            input: req.text,
            audience,
            result: result.clone(),
        },
    )
    .await?;
    Ok(Json(ResolveResponse {
        audience,
        reason: result.reason(),
        result,
    }))
}

async fn session_advise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AdviseRequest>,
) -> Result<Json<AdviseResponse>, ApiError> {
    checked_text(&req.text)?;
    let result = state.advisor.advise(&req.text);
    apply_event(
        &state,
        &id,
        SessionEvent::Advised {
            input: req.text,
            result: result.clone(),
        },
    )
    .await?;
    Ok(Json(AdviseResponse {
        reason: result.reason(),
        result,
    }))
}

async fn set_grace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<GraceRequest>,
) -> Result<Json<ScriptSheet>, ApiError> {
    let level = req
        .level
        .parse::<GraceLevel>()
        .map_err(|e| bad_request(e.to_string()))?;
    apply_event(&state, &id, SessionEvent::GraceChanged(level)).await?;
    scripts_for(&state, &id).await.map(Json)
}

async fn get_scripts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ScriptSheet>, ApiError> {
    scripts_for(&state, &id).await.map(Json)
}

async fn scripts_for(state: &AppState, id: &str) -> Result<ScriptSheet, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(id).ok_or_else(|| not_found(id))?;
    Ok(ScriptSheet::new(&session.profile, session.grace))
}

/// Run the API server
pub async fn run_server(addr: &str, state: Arc<AppState>) -> crate::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "Guardian 360 API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
