pub mod error;
pub mod scan;
pub mod source;

use dx_error::ErrorKind;
use dx_tree::Expr;
use error::{
    kind::{
        EmptyExpression,
        EmptyParenthesis,
        MissingOperand,
        RecursionLimit,
        Side,
        UnbalancedParenthesis,
        UngroupedLogBase,
        UnrecognizedExpression,
    },
    Error,
};
use scan::{find_split, matching_close, Direction, Unbalanced};
use source::Source;
use super::tokenizer::parse_literal;
use std::ops::Range;

/// The default maximum nesting depth of a parsed expression.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A high-level parser for expressions over `x`. This is the type to use to parse a piece of text
/// into an expression tree when the default configuration is not enough.
///
/// Each tier of the grammar is a method taking the range of the stripped source it should parse.
/// A tier looks for its operator outside of all parentheses; if it finds one, the text on either
/// side of it is parsed separately, otherwise the whole range falls through to the next tier.
#[derive(Debug, Clone)]
pub struct Parser {
    /// The input, with whitespace removed.
    source: Source,

    /// The deepest a node may be nested below the root.
    max_depth: usize,
}

impl Parser {
    /// Create a new parser for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            source: Source::new(source),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth. Input nested more deeply than this is rejected with
    /// [`RecursionLimit`].
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses the whole source into an expression tree.
    pub fn parse(&self) -> Result<Expr, Error> {
        if self.source.is_empty() {
            return Err(self.error(0..0, 0..0, EmptyExpression));
        }
        self.parse_additive(0..self.source.len(), 0)
    }

    /// The stripped text in the given range.
    fn text(&self, range: Range<usize>) -> &str {
        &self.source.text()[range]
    }

    /// Creates an error about the text in `fragment`, pointing at `span`. Both ranges are in the
    /// stripped text.
    fn error(
        &self,
        fragment: Range<usize>,
        span: Range<usize>,
        kind: impl ErrorKind + 'static,
    ) -> Error {
        let fragment = self.text(fragment);
        log::debug!("cannot parse `{}`: {}", fragment, kind.message());
        Error::new(vec![self.source.span(span)], fragment, kind)
    }

    /// Returns the depth of a child of a node at `depth`, or an error if it is too deep.
    fn descend(&self, range: Range<usize>, depth: usize) -> Result<usize, Error> {
        if depth >= self.max_depth {
            return Err(self.error(
                range.clone(),
                range,
                RecursionLimit { limit: self.max_depth },
            ));
        }
        Ok(depth + 1)
    }

    /// Finds where the range should be split by one of the given operators.
    fn split(
        &self,
        range: Range<usize>,
        ops: &[u8],
        direction: Direction,
    ) -> Result<Option<usize>, Error> {
        find_split(self.source.bytes(), range.clone(), ops, direction).map_err(
            |Unbalanced { at, opening }| {
                self.error(range, at..at + 1, UnbalancedParenthesis { opening })
            },
        )
    }

    /// Splits `range` around the operator at `at`, checking that both sides are non-empty.
    fn operands(
        &self,
        range: Range<usize>,
        at: usize,
    ) -> Result<(Range<usize>, Range<usize>), Error> {
        let (lhs, rhs) = (range.start..at, at + 1..range.end);
        let side = if lhs.is_empty() {
            Side::Left
        } else if rhs.is_empty() {
            Side::Right
        } else {
            log::trace!(
                "split `{}` into `{}` {} `{}`",
                self.text(range),
                self.text(lhs.clone()),
                self.source.bytes()[at] as char,
                self.text(rhs.clone()),
            );
            return Ok((lhs, rhs));
        };

        let op = self.source.bytes()[at] as char;
        Err(self.error(range, at..at + 1, MissingOperand { op, side }))
    }

    /// `A -> M (('+' | '-') A)`
    fn parse_additive(&self, range: Range<usize>, depth: usize) -> Result<Expr, Error> {
        let Some(at) = self.split(range.clone(), b"+-", Direction::RightToLeft)? else {
            return self.parse_multiplicative(range, depth);
        };

        let (lhs, rhs) = self.operands(range.clone(), at)?;
        let depth = self.descend(range, depth)?;
        let lhs = self.parse_additive(lhs, depth)?;
        let rhs = self.parse_multiplicative(rhs, depth)?;
        Ok(match self.source.bytes()[at] {
            b'+' => Expr::sum(lhs, rhs),
            _ => Expr::difference(lhs, rhs),
        })
    }

    /// `M -> E (('*' | '/') M)`
    fn parse_multiplicative(&self, range: Range<usize>, depth: usize) -> Result<Expr, Error> {
        let Some(at) = self.split(range.clone(), b"*/", Direction::RightToLeft)? else {
            return self.parse_power(range, depth);
        };

        let (lhs, rhs) = self.operands(range.clone(), at)?;
        let depth = self.descend(range, depth)?;
        let lhs = self.parse_multiplicative(lhs, depth)?;
        let rhs = self.parse_power(rhs, depth)?;
        Ok(match self.source.bytes()[at] {
            b'*' => Expr::product(lhs, rhs),
            _ => Expr::quotient(lhs, rhs),
        })
    }

    /// `E -> 'log' '(' S ')' | P '^' E | P`
    fn parse_power(&self, range: Range<usize>, depth: usize) -> Result<Expr, Error> {
        let Some(at) = self.split(range.clone(), b"^", Direction::LeftToRight)? else {
            return match self.log_group(range.clone()) {
                Some(interior) => Ok(Expr::log(self.parse_group(range, interior, depth)?)),
                None => self.parse_primary(range, depth),
            };
        };

        let (base, exponent) = self.operands(range.clone(), at)?;
        let depth = self.descend(range, depth)?;
        let base = self.parse_base(base, depth)?;
        let exponent = self.parse_power(exponent, depth)?;
        Ok(Expr::power(base, exponent))
    }

    /// Parses the base of a power, which must be a primary expression.
    fn parse_base(&self, range: Range<usize>, depth: usize) -> Result<Expr, Error> {
        if self.log_group(range.clone()).is_some() {
            return Err(self.error(range.clone(), range, UngroupedLogBase));
        }
        self.parse_primary(range, depth)
    }

    /// `P -> '(' S ')' | L | V`
    fn parse_primary(&self, range: Range<usize>, depth: usize) -> Result<Expr, Error> {
        if let Some(interior) = self.paren_group(range.clone()) {
            return Ok(Expr::paren(self.parse_group(range, interior, depth)?));
        }

        let text = self.text(range.clone());
        if text == "x" {
            return Ok(Expr::variable());
        }
        match parse_literal(text) {
            Some(value) => Ok(Expr::literal(value)),
            None => Err(self.error(range.clone(), range, UnrecognizedExpression)),
        }
    }

    /// Parses the interior of a parenthesized group or `log(...)` call spanning `range`.
    fn parse_group(
        &self,
        range: Range<usize>,
        interior: Range<usize>,
        depth: usize,
    ) -> Result<Expr, Error> {
        if interior.is_empty() {
            return Err(self.error(range.clone(), range, EmptyParenthesis));
        }
        let depth = self.descend(interior.clone(), depth)?;
        self.parse_additive(interior, depth)
    }

    /// If the whole range is a single parenthesized group, returns the range of its interior.
    fn paren_group(&self, range: Range<usize>) -> Option<Range<usize>> {
        let bytes = self.source.bytes();
        if range.is_empty() || bytes[range.start] != b'(' {
            return None;
        }
        let close = matching_close(bytes, range.start, range.end)?;
        (close + 1 == range.end).then_some(range.start + 1..close)
    }

    /// If the whole range is a single `log(...)` call, returns the range of its argument.
    fn log_group(&self, range: Range<usize>) -> Option<Range<usize>> {
        if !self.text(range.clone()).starts_with("log(") {
            return None;
        }
        self.paren_group(range.start + 3..range.end)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use dx_tree::{BinOp, PowerForm};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(text: &str) -> Result<Expr, Error> {
        Parser::new(text).parse()
    }

    fn tree(text: &str) -> String {
        parse(text).unwrap().convert_to_string(0)
    }

    #[test]
    fn single_sum() {
        assert_eq!(tree("x+x"), "+\n\tx\n\tx\n");
    }

    #[test]
    fn literal_times_variable() {
        assert_eq!(tree("13*x"), "*\n\t13.0\n\tx\n");
    }

    #[test]
    fn nested_shape() {
        assert_eq!(
            tree("10*x^3 + 2*(15+x)"),
            "+\n\t*\n\t\t10.0\n\t\t^\n\t\t\tx\n\t\t\t3.0\n\t*\n\t\t2.0\n\t\t()\n\t\t\t+\n\t\t\t\t15.0\n\t\t\t\tx\n",
        );
    }

    #[test]
    fn log_shape() {
        assert_eq!(tree("log(2*x)"), "log()\n\t*\n\t\t2.0\n\t\tx\n");
        assert_eq!(tree("(log(x))^2"), "^\n\t()\n\t\tlog()\n\t\t\tx\n\t2.0\n");
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(parse(" 4 *\t( x + 5*x )\n").unwrap(), parse("4*(x+5*x)").unwrap());
    }

    #[test]
    fn nested_value() {
        assert_eq!(parse("4*(x+5*x)").unwrap().evaluate(3.0), 72.0);
    }

    #[test]
    fn multiplicative_left_associative() {
        assert_eq!(parse("9/3*3").unwrap().evaluate(333.0), 9.0);
    }

    #[test]
    fn power_right_associative() {
        assert_eq!(parse("4^3^2").unwrap().evaluate(0.0), 262144.0);
    }

    #[test]
    fn additive_left_associative() {
        assert_eq!(parse("10-5-2").unwrap().evaluate(0.0), 3.0);
    }

    #[test]
    fn precedence() {
        assert_eq!(parse("4-3*x").unwrap().evaluate(2.5), -3.5);
        assert_eq!(parse("2+3*4^2").unwrap().evaluate(0.0), 50.0);
        assert_eq!(parse("x").unwrap().evaluate(2.0), 2.0);
    }

    #[test]
    fn signed_literals() {
        assert_float_absolute_eq!(
            parse("1./(1. + 5^(-1*x))").unwrap().evaluate(1.0),
            1.0 / 1.2,
            1e-12
        );
        assert_eq!(parse("2*-3").unwrap().evaluate(0.0), -6.0);
        assert_eq!(parse("x--3").unwrap().evaluate(1.0), 4.0);
        assert_eq!(parse("1e-5").unwrap(), Expr::literal(1e-5));
        assert_eq!(parse("-Infinity").unwrap(), Expr::literal(f64::NEG_INFINITY));
    }

    #[test]
    fn power_forms() {
        let Expr::Binary(binary) = parse("2^x").unwrap() else {
            unreachable!()
        };
        assert_eq!(binary.op(), BinOp::Exp(PowerForm::ConstantBase(2.0)));

        let Expr::Binary(binary) = parse("(x+1)^0.5").unwrap() else {
            unreachable!()
        };
        assert_eq!(binary.op(), BinOp::Exp(PowerForm::ConstantExponent(0.5)));
    }

    #[test]
    fn missing_operand() {
        let err = parse("1+2+").unwrap_err();
        assert_eq!(
            err.downcast_ref::<MissingOperand>(),
            Some(&MissingOperand { op: '+', side: Side::Right }),
        );
        assert_eq!(err.fragment(), "1+2+");

        let err = parse("*3").unwrap_err();
        assert_eq!(
            err.downcast_ref::<MissingOperand>(),
            Some(&MissingOperand { op: '*', side: Side::Left }),
        );

        let err = parse("x^").unwrap_err();
        assert!(err.is::<MissingOperand>());
    }

    #[test]
    fn empty_parenthesis() {
        let err = parse("((()))").unwrap_err();
        assert!(err.is::<EmptyParenthesis>());
        assert_eq!(err.fragment(), "()");

        assert!(parse("log()").unwrap_err().is::<EmptyParenthesis>());
    }

    #[test]
    fn adjacent_groups() {
        let err = parse("()()").unwrap_err();
        assert!(err.is::<UnrecognizedExpression>());
        assert_eq!(err.fragment(), "()()");
    }

    #[test]
    fn unrecognized() {
        for text in ["2x", "y", "xx", "-x", "log", "ln(x)", "1.5.5", "0x10"] {
            let err = parse(text).unwrap_err();
            assert!(err.is::<UnrecognizedExpression>(), "`{}` gave {:?}", text, err);
        }
    }

    #[test]
    fn empty() {
        assert!(parse("").unwrap_err().is::<EmptyExpression>());
        assert!(parse(" \t\n").unwrap_err().is::<EmptyExpression>());
    }

    #[test]
    fn unbalanced() {
        let err = parse("(1").unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnbalancedParenthesis>(),
            Some(&UnbalancedParenthesis { opening: true }),
        );
        assert_eq!(err.spans, vec![0..1]);

        let err = parse("1)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnbalancedParenthesis>(),
            Some(&UnbalancedParenthesis { opening: false }),
        );
        assert_eq!(err.spans, vec![1..2]);

        assert!(parse("(x+1))^2").unwrap_err().is::<UnbalancedParenthesis>());
        assert!(parse("log(x").unwrap_err().is::<UnbalancedParenthesis>());
    }

    #[test]
    fn log_as_base() {
        let err = parse("log(x)^2").unwrap_err();
        assert!(err.is::<UngroupedLogBase>());
        assert_eq!(err.fragment(), "log(x)");
        assert_eq!(err.spans, vec![0..6]);
    }

    #[test]
    fn spans_point_at_original_text() {
        let err = parse("  1 + 2 +  ").unwrap_err();
        assert_eq!(err.spans, vec![8..9]);

        let err = parse("3 * (2 x)").unwrap_err();
        assert!(err.is::<UnrecognizedExpression>());
        assert_eq!(err.fragment(), "2x");
        assert_eq!(err.spans, vec![5..8]);
    }

    #[test]
    fn depth_limit() {
        assert!(Parser::new("((((x))))").max_depth(4).parse().is_ok());

        let err = Parser::new("((((x))))").max_depth(3).parse().unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecursionLimit>(),
            Some(&RecursionLimit { limit: 3 }),
        );
    }

    #[test]
    fn default_depth_limit() {
        let text = format!("{}x{}", "(".repeat(300), ")".repeat(300));
        let err = parse(&text).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecursionLimit>(),
            Some(&RecursionLimit { limit: DEFAULT_MAX_DEPTH }),
        );

        let text = format!("{}x{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse(&text).unwrap().depth(), 201);
    }

    #[test]
    fn long_chain_counts_operators() {
        let text = vec!["x"; 300].join("+");
        let err = parse(&text).unwrap_err();
        assert!(err.is::<RecursionLimit>());
        assert!(err.to_string().ends_with("expression has too many operators or nesting levels"));

        let expr = Parser::new(&text).max_depth(400).parse().unwrap();
        assert_eq!(expr.evaluate(1.0), 300.0);
    }

    #[test]
    fn display_round_trip() {
        for text in [
            "x+x",
            "10*x^3+2*(15+x)",
            "1/(1+5^(-1*x))",
            "4^3^2",
            "10-5-2",
            "9/3*3",
            "(log(x))^2-log(x^2)",
            "2*-3",
            "x--0.5",
            "1e-7*x",
        ] {
            let expr = parse(text).unwrap();
            assert_eq!(parse(&expr.to_string()).unwrap(), expr, "round trip of `{}`", text);
        }
    }

    #[test]
    fn error_display() {
        let err = parse("1+2+").unwrap_err();
        assert_eq!(err.to_string(), "cannot parse `1+2+`: missing operand for `+`");
    }
}
