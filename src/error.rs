/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the application
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    /// A descriptor region whose repaired text is not valid JSON, or whose
    /// JSON does not have the shape of a class or function descriptor.
    MalformedDescriptor {
        line: usize,
        buffer: String,
        message: String,
    },
}

impl Error {
    /// The raw descriptor text, when the error came from a descriptor region.
    pub fn raw_buffer(&self) -> Option<&str> {
        match self {
            Error::MalformedDescriptor { buffer, .. } => Some(buffer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::MalformedDescriptor { line, message, .. } => {
                write!(f, "malformed descriptor at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}
