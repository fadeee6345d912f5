pub mod kind;

use ariadne::Report;
use dx_error::ErrorKind;
use std::{fmt, ops::Range};

/// A parsing error.
///
/// Every parse failure is reported with this single type. The [`kind`](Error::kind) describes
/// what went wrong; [`fragment`](Error::fragment) is the whitespace-stripped piece of input the
/// parser was working on when it gave up.
#[derive(Debug)]
pub struct Error {
    /// The regions of the original source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The substring that could not be parsed, with whitespace removed.
    pub fragment: String,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans, fragment and kind.
    pub fn new(
        spans: Vec<Range<usize>>,
        fragment: impl Into<String>,
        kind: impl ErrorKind + 'static,
    ) -> Self {
        Self { spans, fragment: fragment.into(), kind: Box::new(kind) }
    }

    /// The substring that could not be parsed.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Returns the concrete error kind, if it is of type `T`.
    pub fn downcast_ref<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref()
    }

    /// Returns true if the error kind is of type `T`.
    pub fn is<T: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse `{}`: {}", self.fragment, self.kind.message())
    }
}

impl std::error::Error for Error {}

impl From<Error> for dx_error::Error {
    fn from(err: Error) -> Self {
        Self { spans: err.spans, kind: err.kind }
    }
}
