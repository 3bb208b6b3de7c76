use std::path::Path;

use crate::adapters::http::http_log_transport::HttpLogTransport;
use crate::adapters::session::file_session_store::FileSessionStore;
use crate::cli::Cli;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::credentials::Credentials;
use crate::core::models::filter::FilterState;
use crate::core::models::raw_log::RawLogRecord;
use crate::core::traits::log_transport::LogTransport;
use crate::core::traits::session_store::SessionStore;

/// Everything a command needs, resolved once from flags, environment
/// and config file.
pub struct Context {
    pub config: AppConfig,
    pub transport: Box<dyn LogTransport>,
}

impl Context {
    /// Resolve configuration and credentials and build the transport.
    pub fn build(args: &Cli) -> Result<Self> {
        let config = AppConfig::load(args.config.as_deref().map(Path::new))?;
        let api_url = config.api_url(args.api_url.as_deref());
        let credentials = resolve_credentials(args.token.as_deref(), &config);

        let transport = HttpLogTransport::new(&api_url, credentials, config.timeout())?;
        tracing::debug!(
            %api_url,
            authenticated = transport.is_authenticated(),
            "resolved audit API endpoint"
        );

        Ok(Self {
            config,
            transport: Box::new(transport),
        })
    }

    /// Fetch the logs `filter` selects. An entity id with no other
    /// server-side filter uses the per-entity endpoint; otherwise it is
    /// sent as `entidadId` with the rest of the query.
    pub fn fetch_filtered(&self, filter: &FilterState) -> Result<Vec<RawLogRecord>> {
        match filter.entity_id_only() {
            Some(id) => self.transport.fetch_logs_by_entity(id),
            None => self.transport.fetch_logs(filter),
        }
    }
}

/// Pick the bearer credential: an explicit token first, then the stored
/// session. A malformed session is reported and treated as no session.
fn resolve_credentials(explicit: Option<&str>, config: &AppConfig) -> Credentials {
    if let Some(token) = explicit {
        let creds = Credentials::bearer(token);
        if !creds.is_anonymous() {
            return creds;
        }
    }

    let Some(path) = config.session_path() else {
        return Credentials::anonymous();
    };
    let store = FileSessionStore::new(path, config.session.storage_key.clone());
    match store.load() {
        Ok(Some(creds)) => creds,
        Ok(None) => {
            tracing::debug!(path = %store.path().display(), "no stored session");
            Credentials::anonymous()
        }
        Err(e) => {
            tracing::warn!("{e}; continuing without credentials");
            Credentials::anonymous()
        }
    }
}
