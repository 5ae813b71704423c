// Fetch-layer errors.

#[derive(Debug, thiserror::Error)]
pub enum SleeperError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        source: serde_json::Error,
    },

    #[error("league {league_id} not found")]
    LeagueNotFound { league_id: String },

    #[error("snapshot file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
