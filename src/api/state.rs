use std::sync::Arc;

use crate::core::AppConfig;
use crate::graph::{ClientCredentials, GraphClient};

pub struct AppState {
    pub graph: Arc<GraphClient>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let tokens = Arc::new(ClientCredentials::new(&config));
        let graph = Arc::new(GraphClient::new(config.graph_api_url.clone(), tokens));
        Self { graph, config }
    }
}
