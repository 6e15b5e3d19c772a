use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidChart(String),
    MalformedTerms { len: usize },
    Conjugation(String),
    Template(String),
    Zip(zip::result::ZipError),
    Xml(roxmltree::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    Worker(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidChart(reason) => write!(f, "invalid chart: {reason}"),
            Error::MalformedTerms { len } => {
                write!(f, "term list must hold (right, left) pairs, got {len} terms")
            }
            Error::Conjugation(e) => write!(f, "conjugation error: {e}"),
            Error::Template(reason) => write!(f, "unusable template: {reason}"),
            Error::Zip(e) => write!(f, "ZIP error: {e}"),
            Error::Xml(e) => write!(f, "XML error: {e}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Worker(e) => write!(f, "worker thread failed: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Xml(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
