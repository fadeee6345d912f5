use ariadne::Fmt;
use crate::session::MAX_DERIVATIVES;
use dx_attrs::ErrorKind;
use dx_error::{ErrorKind, EXPR};

/// The line started with `:`, but the rest is not a command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", self.name),
    labels = ["this command does not exist"],
    help = format!("type {} for a list of commands", ":help".fg(EXPR)),
)]
pub struct UnknownCommand {
    /// The name of the command, including the leading `:`.
    pub name: String,
}

/// A command that works on the current expression was used before any expression was entered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there is no current expression",
    labels = ["this command needs an expression to work on"],
    help = format!("enter an expression first, such as {}", "x^2 + 1".fg(EXPR)),
)]
pub struct NoCurrentExpression;

/// A command was given an argument it could not understand, or none at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {}", self.expected),
    labels = [format!("I expected {} here", self.expected)],
)]
pub struct InvalidArgument {
    /// What the command expected to find.
    pub expected: &'static str,
}

/// `:diff` was asked for a number of derivatives outside of the allowed range.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot take {} derivatives at once", self.count),
    labels = ["this count is out of range"],
    help = format!("the count must be between 1 and {}", MAX_DERIVATIVES),
)]
pub struct DerivativeCount {
    /// The count that was given.
    pub count: usize,
}

/// `:diff` reached a power it has no rule for in the current expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `({})^({})`", self.base, self.exponent),
    labels = ["the current expression contains a power this command cannot differentiate"],
    help = format!(
        "only powers with a literal base ({}) or a literal exponent ({}) can be differentiated",
        "2^x".fg(EXPR),
        "x^2".fg(EXPR),
    ),
)]
pub struct CannotDifferentiate {
    /// The base of the power, in infix form.
    pub base: String,

    /// The exponent of the power, in infix form.
    pub exponent: String,
}

impl From<dx_tree::NotDifferentiable> for CannotDifferentiate {
    fn from(err: dx_tree::NotDifferentiable) -> Self {
        Self { base: err.base, exponent: err.exponent }
    }
}
