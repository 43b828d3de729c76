#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use music_catalog_api::auth::Identity;
use music_catalog_api::config::AppConfig;
use music_catalog_api::database::{DatabaseManager, PgStore};
use music_catalog_api::state::AppState;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub state: AppState,
}

impl TestServer {
    /// Serve the router in-process on a free port against `DATABASE_URL`.
    /// `None` when no database is configured, so callers can skip.
    pub async fn start() -> Result<Option<Self>> {
        let _ = dotenvy::dotenv();
        if std::env::var("DATABASE_URL").is_err() {
            eprintln!("DATABASE_URL not set; skipping database-backed test");
            return Ok(None);
        }

        let config = AppConfig::from_env()?;
        let pool = DatabaseManager::connect(config.database_url()?, &config.database).await?;
        DatabaseManager::migrate(&pool).await?;

        let state = AppState::try_new(config, Arc::new(PgStore::new(pool)))?;
        let app = music_catalog_api::app(state.clone());

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(Some(server))
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn bearer(&self, id: impl Into<String>) -> Result<String> {
        let token = self.state.tokens.generate(&Identity::new(id))?;
        Ok(format!("Bearer {}", token))
    }

    pub fn admin_bearer(&self) -> Result<String> {
        self.bearer(self.state.config.security.admin_id.to_string())
    }
}

/// Ids that do not collide across test runs against the same database.
pub fn unique_id() -> i64 {
    static COUNTER: AtomicI64 = AtomicI64::new(0);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default();
    1_000_000_000 + (millis % 1_000_000_000) * 100 + COUNTER.fetch_add(1, Ordering::SeqCst) % 100
}
