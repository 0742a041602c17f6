/// Where an operation was initiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    /// HTTP API request
    Http,

    /// Administrative CLI command
    Cli,
}

impl RequestSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestSource::Http => "http",
            RequestSource::Cli => "cli",
        }
    }
}
