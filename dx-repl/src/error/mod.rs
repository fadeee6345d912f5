pub mod kind;

use ariadne::Source;
use dx_parser::Error as ParseError;
use std::{fmt, io};

/// Utility enum to package errors that can occur while handling a line of input.
#[derive(Debug)]
pub enum Error {
    /// Error that occurred while parsing an expression.
    Parse(ParseError),

    /// A malformed command, or an expression that could not be differentiated.
    Command(dx_error::Error),
}

impl Error {
    /// Report the error to stderr, highlighting the given input.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) -> io::Result<()> {
        let report = match self {
            Self::Parse(err) => err.build_report("input"),
            Self::Command(err) => err.build_report("input"),
        };
        report.eprint(("input", Source::from(input)))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => fmt::Display::fmt(err, f),
            Self::Command(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<dx_error::Error> for Error {
    fn from(err: dx_error::Error) -> Self {
        Self::Command(err)
    }
}
