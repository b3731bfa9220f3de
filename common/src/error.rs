use thiserror::Error;

/// Failures of the key/value backend itself.
///
/// Corrupt stored content is not an error at this level: `Persistence::load`
/// degrades it to the caller's default.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available: {0}")]
    Unavailable(String),
    #[error("could not write key `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("could not serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("column index {index} is out of range for {len} columns")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("column {index} is not an object column")]
    NotAnObject { index: usize },
    #[error("schema name must not be empty")]
    EmptyName,
    #[error("schema must contain at least one column")]
    NoColumns,
    #[error("column titles must not be empty")]
    EmptyTitle,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of a failed call to the remote mapping service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced a response (network, CORS, aborted page).
    #[error("An unexpected error occurred")]
    Transport(String),
    /// Non-success status; `message` is the body or a status-derived text.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// Success status but the body is not JSON, even after fence unwrapping.
    #[error("{0}")]
    Unparsable(String),
    /// The request payload could not be built.
    #[error("could not build request: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("export buffer error: {0}")]
    Io(#[from] std::io::Error),
}
