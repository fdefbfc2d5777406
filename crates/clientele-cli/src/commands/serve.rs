//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use clientele_server::ServerConfig;

use super::open_dashboard;

pub async fn cmd_serve(data_path: &Path, host: &str, port: u16, no_auth: bool) -> Result<()> {
    println!("🚀 Starting Clientele web server...");
    println!("   Data: {}", data_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let dashboard = open_dashboard(data_path);

    let mut config = ServerConfig::from_env();
    config.require_auth = !no_auth;

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!(
            "   🔒 Login: {} (set USER_LOGIN / USER_PASSWORD to change)",
            config.credentials.username
        );
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} (CLIENTELE_ALLOWED_ORIGINS)",
            config.allowed_origins.join(", ")
        );
    }
    println!();

    clientele_server::serve_with_config(dashboard, host, port, config)
        .await
        .context("Server failed")
}
