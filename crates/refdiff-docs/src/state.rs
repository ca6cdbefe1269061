use std::sync::Arc;

use refdiff_core::openapi_document;
use serde_json::Value;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Rendered once at startup; the route table is static.
    pub document: Arc<Value>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let document = openapi_document(&config.api_info());
        Self {
            config: Arc::new(config),
            document: Arc::new(document),
        }
    }
}
