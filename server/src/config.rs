use clap::Parser;

/// Runtime configuration for the todo server. Every flag can also be set
/// through its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "In-memory todo REST API")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Origins allowed to call the API from a browser. `*` allows any.
    #[arg(
        long = "cors-origin",
        env = "TODO_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_origins: Vec<String>,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, env = "TODO_LOG_JSON")]
    pub log_json: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors(&self) -> CorsPolicy {
        CorsPolicy::new(self.cors_origins.clone())
    }
}

/// Which browser origins may read API responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    #[default]
    Any,
    List(Vec<String>),
}

impl CorsPolicy {
    pub fn new(origins: Vec<String>) -> Self {
        let origins: Vec<String> = origins
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsPolicy::Any
        } else {
            CorsPolicy::List(origins)
        }
    }

    /// The value for `access-control-allow-origin`, if `origin` is allowed.
    pub fn allow_origin(&self, origin: &str) -> Option<String> {
        match self {
            CorsPolicy::Any => Some("*".to_string()),
            CorsPolicy::List(list) => list.iter().find(|o| *o == origin).cloned(),
        }
    }
}
