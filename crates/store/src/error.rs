use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// A quiz with the same id already exists. Ids are creation-assigned and
    /// never collide by contract, so hitting this is a logic bug upstream.
    Duplicate,
    /// The document could not be serialized.
    Serialize(serde_json::Error),
    /// The document could not be written to disk.
    Io(std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => f.write_str("a quiz with this id already exists"),
            Self::Serialize(err) => write!(f, "cannot serialize the quiz collection: {err}"),
            Self::Io(err) => write!(f, "cannot write the quiz collection: {err}"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
