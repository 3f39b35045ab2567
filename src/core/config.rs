use std::env;

/// Process-wide configuration, loaded once at startup and read-only after.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    /// Graph API base URL, e.g. `https://graph.microsoft.com/v1.0`.
    pub graph_api_url: String,
    /// Identity platform base URL used for the client-credential flow.
    pub login_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client_id =
            env::var("GRAPH_RELAY_CLIENT_ID").expect("Missing env var GRAPH_RELAY_CLIENT_ID");
        let client_secret = env::var("GRAPH_RELAY_CLIENT_SECRET")
            .expect("Missing env var GRAPH_RELAY_CLIENT_SECRET");
        let tenant_id =
            env::var("GRAPH_RELAY_TENANT_ID").expect("Missing env var GRAPH_RELAY_TENANT_ID");
        let graph_api_url = env::var("GRAPH_RELAY_API_URL")
            .unwrap_or_else(|_| "https://graph.microsoft.com/v1.0".to_string());
        let login_url = env::var("GRAPH_RELAY_LOGIN_URL")
            .unwrap_or_else(|_| "https://login.microsoftonline.com".to_string());

        Self {
            client_id,
            client_secret,
            tenant_id,
            graph_api_url,
            login_url,
        }
    }
}
