//! Clientele Web Server
//!
//! Axum-based JSON API for the Clientele customer-service dashboard.
//!
//! Security features:
//! - Single-user login gate with an opaque session cookie (secure by default,
//!   use --no-auth for local dev)
//! - Constant-time password comparison
//! - Restrictive CORS policy
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use clientele_core::Dashboard;

mod handlers;
mod session;

pub use session::{SessionManager, SESSION_TIMEOUT};

/// Name of the login session cookie
pub const SESSION_COOKIE: &str = "clientele_session";

/// Environment variable holding the login name
pub const USER_LOGIN_ENV: &str = "USER_LOGIN";

/// Environment variable holding the password
pub const USER_PASSWORD_ENV: &str = "USER_PASSWORD";

/// Environment variable holding the allowed CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "CLIENTELE_ALLOWED_ORIGINS";

const DEFAULT_USER_LOGIN: &str = "admin";
const DEFAULT_USER_PASSWORD: &str = "admin123";

/// The single dashboard user
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read `USER_LOGIN` / `USER_PASSWORD`, falling back to the defaults
    pub fn from_env() -> Self {
        let username =
            std::env::var(USER_LOGIN_ENV).unwrap_or_else(|_| DEFAULT_USER_LOGIN.to_string());
        let password = std::env::var(USER_PASSWORD_ENV).unwrap_or_else(|_| {
            warn!("{} not set, using the default password", USER_PASSWORD_ENV);
            DEFAULT_USER_PASSWORD.to_string()
        });
        Self { username, password }
    }

    /// Check a login attempt using constant-time comparison
    pub fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both so timing does not reveal which field was wrong
        let user_ok = constant_time_eq(username, &self.username);
        let pass_ok = constant_time_eq(password, &self.password);
        user_ok & pass_ok
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USER_LOGIN, DEFAULT_USER_PASSWORD)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn constant_time_eq(provided: &str, expected: &str) -> bool {
    use subtle::ConstantTimeEq;

    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    // Only compare if lengths match (constant-time for same-length values)
    provided.len() == expected.len() && bool::from(provided.ct_eq(expected))
}

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Whether login is required (secure by default)
    pub require_auth: bool,
    pub credentials: Credentials,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            credentials: Credentials::default(),
            allowed_origins: vec![],
        }
    }
}

impl ServerConfig {
    /// Configuration from the environment; `require_auth` stays on
    pub fn from_env() -> Self {
        Self {
            require_auth: true,
            credentials: Credentials::from_env(),
            allowed_origins: std::env::var(ALLOWED_ORIGINS_ENV)
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        }
    }
}

/// Parse a comma-separated list of origins
///
/// `*` is dropped: credentialed CORS needs explicit origins.
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| {
            if *s == "*" {
                warn!(
                    "Ignoring wildcard origin in {}; list origins explicitly",
                    ALLOWED_ORIGINS_ENV
                );
                return false;
            }
            true
        })
        .map(str::to_string)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub dashboard: Dashboard,
    pub config: ServerConfig,
    pub sessions: SessionManager,
}

/// The user a request was authenticated as
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub name: String,
    pub method: &'static str,
}

/// Extract the session token from the Cookie header
pub(crate) fn session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Authentication middleware - requires a live session cookie
///
/// Page requests without a session are redirected to `/login`; API requests
/// get a JSON 401 instead.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        request.extensions_mut().insert(AuthUser {
            name: "local-dev".to_string(),
            method: "none",
        });
        return next.run(request).await;
    }

    if let Some(token) = session_token(request.headers()) {
        if let Some(user) = state.sessions.validate(&token).await {
            request.extensions_mut().insert(AuthUser {
                name: user,
                method: "session",
            });
            return next.run(request).await;
        }
    }

    let path = request.uri().path();
    if path.starts_with("/api") {
        warn!(path = %path, "Unauthorized request - no valid session");
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "Authentication required"
            })),
        )
            .into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

/// Create the application router
pub fn create_router(dashboard: Dashboard, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        dashboard,
        config: config.clone(),
        sessions: SessionManager::new(),
    });

    let api_routes = Router::new()
        .route("/me", get(handlers::get_me))
        .route("/options", get(handlers::get_options))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/insights", get(handlers::get_insights))
        .route("/charts", get(handlers::get_charts))
        .route("/table", get(handlers::get_table));

    let protected = Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public = Router::new()
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", get(handlers::logout));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter(|o| o.as_str() != "*")
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    };

    // CSP: the pages are plain server-rendered HTML with inline styles only
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; frame-ancestors 'none'",
    );

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

/// Start the server
pub async fn serve(dashboard: Dashboard, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(dashboard, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    dashboard: Dashboard,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    info!(
        rows = dashboard.dataset().len(),
        source = ?dashboard.source(),
        "Dashboard data ready"
    );

    let app = create_router(dashboard, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error: bad input is the client's fault, the rest is ours
    pub fn from_core(err: clientele_core::Error) -> Self {
        match err {
            clientele_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
