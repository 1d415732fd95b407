use thiserror::Error;

/// Errors raised by the codec and by the file harness around it.
///
/// Every error is terminal for the call that raised it: no partial output is
/// ever returned alongside one.
#[derive(Error, Debug)]
pub enum HuffError {
    /// The operation was asked to work on input it cannot handle, e.g. a tree
    /// built from an empty frequency map.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A code does not fit the 1-byte per-code length field.
    #[error("Code for symbol {symbol:#04x} is {len} bits long, at most {max} are allowed", max = u8::MAX)]
    CodeTooLong {
        symbol: u8,
        len: usize,
    },

    /// The serialized table does not fit the container's table length field.
    #[error("Serialized code table is {len} bytes, the container layout allows at most {max}")]
    TableTooLarge {
        len: usize,
        max: usize,
    },

    /// Decode input is truncated or internally inconsistent.
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Properties error: {0}")]
    Properties(#[from] java_properties::PropertiesError),

    #[error("Invalid property {key}: {reason}")]
    InvalidProperty {
        key: String,
        reason: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HuffError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        HuffError::MalformedContainer(message.into())
    }
}

pub type Result<T> = std::result::Result<T, HuffError>;
