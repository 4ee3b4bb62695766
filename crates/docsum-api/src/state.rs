//! # Application State
//!
//! Shared state for the Axum application: the stores, the two lifecycle
//! managers and the session token keys. Built once
//! in `main` and cloned into every handler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docsum_core::SummaryStyle;
use docsum_lifecycle::{
    DocumentLocks, DocumentManager, IdentityStore, MemoryStore, ResourceStore, SummarizeError,
    Summarizer, SummaryManager, DEFAULT_SUMMARIZE_TIMEOUT,
};
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

use crate::auth::token::{TokenKeys, DEFAULT_TTL};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Process configuration read from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind.
    pub port: u16,
    /// HS256 secret for session tokens.
    pub jwt_secret: Zeroizing<Vec<u8>>,
    /// Whether `jwt_secret` was generated at startup.
    pub jwt_secret_ephemeral: bool,
    /// Session token lifetime.
    pub jwt_ttl: Duration,
    /// Postgres URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on one summarizer call.
    pub summarize_timeout: Duration,
    /// Log output format.
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_secret_ephemeral", &self.jwt_secret_ephemeral)
            .field("jwt_ttl", &self.jwt_ttl)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("summarize_timeout", &self.summarize_timeout)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: ephemeral_secret(),
            jwt_secret_ephemeral: true,
            jwt_ttl: DEFAULT_TTL,
            database_url: None,
            summarize_timeout: DEFAULT_SUMMARIZE_TIMEOUT,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u64 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let (jwt_secret, jwt_secret_ephemeral) = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => (Zeroizing::new(secret.into_bytes()), false),
            _ => (defaults.jwt_secret, true),
        };

        Self {
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            jwt_secret,
            jwt_secret_ephemeral,
            jwt_ttl: parse_u64("JWT_TTL_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.jwt_ttl),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            summarize_timeout: parse_u64("SUMMARIZER_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.summarize_timeout),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }

    /// Token keys derived from the configured secret and lifetime.
    pub fn token_keys(&self) -> TokenKeys {
        TokenKeys::from_secret(&self.jwt_secret, self.jwt_ttl)
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0u8; 32]);
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Summarizer used when no upstream is configured. Every call fails, so
/// summary creation answers 503.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSummarizer;

#[async_trait]
impl Summarizer for UnavailableSummarizer {
    async fn summarize(&self, _content: &str, _style: SummaryStyle) -> Result<String, SummarizeError> {
        Err(SummarizeError::new("summarization service is not configured"))
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Users and credentials.
    pub identities: Arc<dyn IdentityStore>,
    /// Documents and summaries.
    pub resources: Arc<dyn ResourceStore>,
    /// Document lifecycle.
    pub documents: DocumentManager,
    /// Summary lifecycle.
    pub summaries: SummaryManager,
    /// Session token keys.
    pub tokens: TokenKeys,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("documents", &self.documents)
            .field("summaries", &self.summaries)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire both managers over the given stores. The managers share one
    /// [`DocumentLocks`] table.
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        resources: Arc<dyn ResourceStore>,
        summarizer: Arc<dyn Summarizer>,
        tokens: TokenKeys,
        summarize_timeout: Duration,
    ) -> Self {
        let locks = DocumentLocks::new();
        Self {
            documents: DocumentManager::new(resources.clone(), locks.clone()),
            summaries: SummaryManager::new(resources.clone(), summarizer, locks, summarize_timeout),
            identities,
            resources,
            tokens,
        }
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(summarizer: Arc<dyn Summarizer>, tokens: TokenKeys) -> Self {
        Self::in_memory_with_timeout(summarizer, tokens, DEFAULT_SUMMARIZE_TIMEOUT)
    }

    /// [`AppState::in_memory`] with an explicit summarizer timeout.
    pub fn in_memory_with_timeout(
        summarizer: Arc<dyn Summarizer>,
        tokens: TokenKeys,
        summarize_timeout: Duration,
    ) -> Self {
        let store = MemoryStore::new();
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store),
            summarizer,
            tokens,
            summarize_timeout,
        )
    }
}
