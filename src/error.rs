use thiserror::Error;

pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Error, Debug)]
pub enum HuffError {
    /// The byte store failed to read or write a file.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    /// The archive header, table or payload is inconsistent.
    #[error("Malformed archive: {0}")]
    Format(String),
    /// A byte of the input has no code in the encoding map.
    #[error("Byte {0:#04x} not in encoding map")]
    Encoding(u8),
    /// The bit sequence does not decode to the expected symbols.
    #[error("Decoding failed: {0}")]
    Decoding(String),
}

impl HuffError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        HuffError::Format(msg.into())
    }

    pub(crate) fn decoding(msg: impl Into<String>) -> Self {
        HuffError::Decoding(msg.into())
    }
}
