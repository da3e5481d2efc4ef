//! Unified error type for LBF.
//!
//! [`LbfError`] is the single crate error. Framework conditions raised by
//! actions and helpers are carried by [`LbfError::Framework`], tagged with
//! an [`ErrorKind`] discriminant so callers can branch on the kind without
//! a type per condition. Configuration failures get their own variants
//! with contextual hints, and [`ValidationError`] describes a single
//! problem found while validating a config payload.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    ClassNotFound,
    UndefinedProperty,
    DirectoryNotFound,
    FileNotFound,
    FileNotWriteable,
    CantSetCookie,
    InvalidErrorCode,
    UniqueValueDuplicate,
    MissingComponent,
    InvalidInput,
    MissingRequiredInput,
    LdapConnect,
    LogPathNotSet,
    IndexNotInArray,
    PropertyNotInObject,
    ScalarVariable,
}

impl ErrorKind {
    pub const ALL: [Self; 16] = [
        Self::ClassNotFound,
        Self::UndefinedProperty,
        Self::DirectoryNotFound,
        Self::FileNotFound,
        Self::FileNotWriteable,
        Self::CantSetCookie,
        Self::InvalidErrorCode,
        Self::UniqueValueDuplicate,
        Self::MissingComponent,
        Self::InvalidInput,
        Self::MissingRequiredInput,
        Self::LdapConnect,
        Self::LogPathNotSet,
        Self::IndexNotInArray,
        Self::PropertyNotInObject,
        Self::ScalarVariable,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClassNotFound => "class_not_found",
            Self::UndefinedProperty => "undefined_property",
            Self::DirectoryNotFound => "directory_not_found",
            Self::FileNotFound => "file_not_found",
            Self::FileNotWriteable => "file_not_writeable",
            Self::CantSetCookie => "cant_set_cookie",
            Self::InvalidErrorCode => "invalid_error_code",
            Self::UniqueValueDuplicate => "unique_value_duplicate",
            Self::MissingComponent => "missing_component",
            Self::InvalidInput => "invalid_input",
            Self::MissingRequiredInput => "missing_required_input",
            Self::LdapConnect => "ldap_connect",
            Self::LogPathNotSet => "log_path_not_set",
            Self::IndexNotInArray => "index_not_in_array",
            Self::PropertyNotInObject => "property_not_in_object",
            Self::ScalarVariable => "scalar_variable",
        }
    }

    /// Kinds caused by what the caller sent rather than by server state.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::MissingRequiredInput
                | Self::UniqueValueDuplicate
                | Self::ScalarVariable
                | Self::IndexNotInArray
                | Self::PropertyNotInObject
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub section: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}.{}: {}", self.section, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LbfError {
    #[error("{kind}: {message}")]
    Framework { kind: ErrorKind, message: String },

    #[error("No config source found.\n\n  {hint}")]
    NoConfigSource { hint: String },

    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

impl LbfError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Framework {
            kind,
            message: message.into(),
        }
    }

    /// The framework kind this error corresponds to, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Framework { kind, .. } => Some(*kind),
            Self::ConfigFileNotFound { .. } => Some(ErrorKind::FileNotFound),
            Self::ConfigValidation { .. } | Self::UnsupportedFormat(_) => {
                Some(ErrorKind::InvalidInput)
            }
            Self::NoConfigSource { .. } => Some(ErrorKind::MissingComponent),
            _ => None,
        }
    }
}
