#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },
    #[error("layouter failed: {message}")]
    Layouter { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
