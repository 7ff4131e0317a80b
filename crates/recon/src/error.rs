use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CheckError {
    /// Scored response table is absent.
    ResponsesMissing { path: PathBuf },
    /// Answer key file is absent.
    KeyMissing { path: PathBuf },
    /// Answer key JSON is malformed or has the wrong shape.
    KeyParse(String),
    /// Response CSV could not be read.
    CsvParse(String),
    /// Missing required column in the response table.
    MissingColumn { column: String },
    /// A `correct` / `incorrect` cell that is neither empty nor an integer.
    InvalidCount { line: usize, column: String, value: String },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty scale, empty naming markers).
    ConfigValidation(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl CheckError {
    /// Remediation hint for the operator, where one exists.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ResponsesMissing { .. } => Some("run targets pipeline first"),
            Self::KeyMissing { .. } => Some("ensure answer key is present"),
            _ => None,
        }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResponsesMissing { path } => write!(f, "missing {}", path.display()),
            Self::KeyMissing { path } => write!(f, "missing {}", path.display()),
            Self::KeyParse(msg) => write!(f, "answer key parse error: {msg}"),
            Self::CsvParse(msg) => write!(f, "response table parse error: {msg}"),
            Self::MissingColumn { column } => {
                write!(f, "response table: missing column '{column}'")
            }
            Self::InvalidCount { line, column, value } => {
                write!(f, "line {line}: cannot parse {column} count '{value}'")
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for CheckError {}
