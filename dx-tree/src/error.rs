use ariadne::Fmt;
use dx_attrs::ErrorKind;
use dx_error::{ErrorKind, EXPR};
use std::fmt;

/// A power whose base and exponent both depend on `x` (or are otherwise not literals) was
/// differentiated. Only `c^h` and `g^c` with a literal `c` have a rule.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `({})^({})`", self.base, self.exponent),
    labels = ["this expression contains a power whose base and exponent are both non-constant"],
    help = format!(
        "only powers with a literal base ({}) or a literal exponent ({}) can be differentiated",
        "2^x".fg(EXPR),
        "x^2".fg(EXPR),
    ),
)]
pub struct NotDifferentiable {
    /// The base of the power, in infix form.
    pub base: String,

    /// The exponent of the power, in infix form.
    pub exponent: String,
}

impl fmt::Display for NotDifferentiable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for NotDifferentiable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_both_operands() {
        let err = NotDifferentiable {
            base: "x".to_string(),
            exponent: "x+1".to_string(),
        };
        assert_eq!(err.to_string(), "cannot differentiate `(x)^(x+1)`");
    }

    #[test]
    fn report_points_at_given_span() {
        let err = dx_error::Error::new(vec![0..5], NotDifferentiable {
            base: "x".to_string(),
            exponent: "x".to_string(),
        });
        let _ = err.build_report("input");
        assert!(err.downcast_ref::<NotDifferentiable>().is_some());
    }
}
