//! Error types and result definitions for reconciliation operations.
//!
//! [`PostnrError`] carries an [`ErrorKind`] classification together with the
//! captured callsite and backtrace, so a failed run can be diagnosed from the
//! error alone. Construction normally goes through the [`crate::postnr_error!`]
//! and [`crate::bail!`] macros.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for reconciliation operations using [`PostnrError`].
pub type PostnrResult<T> = Result<T, PostnrError>;

/// Error raised by the reconciliation engine and its collaborators.
#[derive(Debug, Clone)]
pub struct PostnrError {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
    backtrace: Arc<Backtrace>,
}

/// Specific categories of errors that can occur during a reconciliation run.
///
/// Kinds are grouped by functional area. [`ErrorKind::UnknownCounty`] is the
/// one fatal configuration error the engine itself raises: the authority
/// referenced a county the local store does not know about, and continuing
/// would corrupt stale detection.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Engine errors
    UnknownCounty,
    MissingDistrict,

    // Record source errors
    SourceIoError,
    SourceParseError,
    InvalidRecord,

    // Region store errors
    StoreError,

    // Configuration errors
    ConfigError,

    // IO & serialization errors
    IoError,
    SerializationError,
    DeserializationError,

    // Unknown / uncategorized
    Unknown,
}

impl PostnrError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the captured backtrace for this error.
    pub fn backtrace(&self) -> &Backtrace {
        self.backtrace.as_ref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Attaches an originating [`error::Error`] to this error and returns the
    /// modified instance.
    ///
    /// The stored source is preserved across clones and exposed via
    /// [`error::Error::source`].
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Creates a [`PostnrError`] from its components.
    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    ) -> Self {
        PostnrError {
            kind,
            description,
            detail,
            source,
            location: Location::caller(),
            backtrace: Arc::new(Backtrace::capture()),
        }
    }
}

impl PartialEq for PostnrError {
    /// Compares errors by [`ErrorKind`] only.
    ///
    /// Detail, location and backtrace are runtime artifacts of a particular
    /// occurrence and are intentionally excluded, so tests can match on the
    /// category of a failure.
    fn eq(&self, other: &PostnrError) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for PostnrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "[{:?}] {} @ {}:{}:{}",
            self.kind,
            self.description,
            self.location.file(),
            self.location.line(),
            self.location.column()
        )?;

        if let Some(detail) = self.detail.as_deref() {
            if detail.trim().is_empty() {
                write!(f, "\n  Detail: <empty>")?;
            } else {
                write!(f, "\n  Detail:")?;
                for line in detail.lines() {
                    write!(f, "\n    {line}")?;
                }
            }
        }

        let rendered_backtrace = format!("{}", self.backtrace);
        if !rendered_backtrace.trim().is_empty() {
            write!(f, "\n  Backtrace:")?;
            for line in rendered_backtrace.lines() {
                write!(f, "\n    {line}")?;
            }
        }

        Ok(())
    }
}

impl error::Error for PostnrError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source as &(dyn error::Error + 'static))
    }
}

/// Creates a [`PostnrError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for PostnrError {
    #[track_caller]
    fn from((kind, desc): (ErrorKind, &'static str)) -> PostnrError {
        PostnrError::from_components(kind, Cow::Borrowed(desc), None, None)
    }
}

/// Creates a [`PostnrError`] from an error kind, static description, and
/// dynamic detail.
impl<D> From<(ErrorKind, &'static str, D)> for PostnrError
where
    D: Into<Cow<'static, str>>,
{
    #[track_caller]
    fn from((kind, desc, detail): (ErrorKind, &'static str, D)) -> PostnrError {
        PostnrError::from_components(kind, Cow::Borrowed(desc), Some(detail.into()), None)
    }
}

/// Converts [`std::io::Error`] to [`PostnrError`] with [`ErrorKind::IoError`].
impl From<std::io::Error> for PostnrError {
    #[track_caller]
    fn from(err: std::io::Error) -> PostnrError {
        let detail = err.to_string();
        PostnrError::from_components(
            ErrorKind::IoError,
            Cow::Borrowed("I/O operation failed"),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

/// Converts [`csv::Error`] to [`PostnrError`].
///
/// Maps to [`ErrorKind::SourceIoError`] for underlying I/O failures and
/// [`ErrorKind::SourceParseError`] for malformed rows in the authority file.
impl From<csv::Error> for PostnrError {
    #[track_caller]
    fn from(err: csv::Error) -> PostnrError {
        let kind = if err.is_io_error() {
            ErrorKind::SourceIoError
        } else {
            ErrorKind::SourceParseError
        };

        let detail = err.to_string();
        PostnrError::from_components(
            kind,
            Cow::Borrowed("failed to read the authority postal table"),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

/// Converts [`serde_json::Error`] to [`PostnrError`] with the appropriate
/// error kind based on error classification.
impl From<serde_json::Error> for PostnrError {
    #[track_caller]
    fn from(err: serde_json::Error) -> PostnrError {
        let (kind, description) = match err.classify() {
            serde_json::error::Category::Io => (ErrorKind::IoError, "JSON I/O operation failed"),
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Data
            | serde_json::error::Category::Eof => (
                ErrorKind::DeserializationError,
                "JSON deserialization failed",
            ),
        };

        let detail = err.to_string();
        PostnrError::from_components(
            kind,
            Cow::Borrowed(description),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}
