pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid chart config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Invalid chart config: {message}")]
    InvalidConfig { message: String },
}
