//! Login, logout and current-user handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::escape_html;
use crate::{session_token, AppState, AuthUser, SESSION_COOKIE};

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// The authenticated user's login
    pub user: String,
    /// How the user was authenticated
    pub auth_method: String,
}

fn login_html(error: Option<&str>) -> Html<String> {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape_html(e)))
        .unwrap_or_default();
    Html(format!(
        r#"<!doctype html>
<html lang="pt-BR">
<head><meta charset="utf-8"><title>Clientele - Login</title></head>
<body>
<h1>Clientele</h1>
{error}
<form method="post" action="/login">
<label>Usuário <input name="username" autocomplete="username"></label>
<label>Senha <input name="password" type="password" autocomplete="current-password"></label>
<button type="submit">Entrar</button>
</form>
</body>
</html>"#
    ))
}

fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/",
        SESSION_COOKIE, token
    )
}

/// GET /login - Login form
pub async fn login_page() -> Html<String> {
    login_html(None)
}

/// POST /login - Check credentials and start a session
pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    if !state
        .config
        .credentials
        .verify(&form.username, &form.password)
    {
        warn!(user = %form.username, "Failed login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            login_html(Some("Usuário ou senha inválidos")),
        )
            .into_response();
    }

    let token = state.sessions.create(&form.username).await;
    info!(user = %form.username, "User logged in");

    (
        [(header::SET_COOKIE, session_cookie(&token))],
        Redirect::to("/"),
    )
        .into_response()
}

/// GET /logout - End the session and clear the cookie
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if state.sessions.remove(&token).await {
            info!("User logged out");
        }
    }

    let cleared = format!(
        "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0",
        SESSION_COOKIE
    );
    ([(header::SET_COOKIE, cleared)], Redirect::to("/login")).into_response()
}

/// GET /api/me - Get the currently authenticated user
pub async fn get_me(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        user: user.name,
        auth_method: user.method.to_string(),
    })
}
