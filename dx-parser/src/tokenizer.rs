//! Recognition of numeric literals.
//!
//! A literal is recognized only if a single token spans the whole text, so `1e` or `0x1p3` are
//! not literals, and neither is `1+2`. Hexadecimal floats and type suffixes such as `2.5f` are not
//! supported.

use logos::{Lexer, Logos};

/// The different kinds of literal tokens.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum LiteralKind {
    /// A decimal number with an optional sign, fractional part and exponent, such as `3`, `-2.`,
    /// `.5` or `6.02e23`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Decimal,

    #[regex(r"[+-]?NaN")]
    NaN,

    #[regex(r"[+-]?Infinity")]
    Infinity,
}

/// Returns an iterator over the literal tokens in the input.
pub fn tokenize(input: &str) -> Lexer<'_, LiteralKind> {
    LiteralKind::lexer(input)
}

/// Returns the value of `text` if the whole text is one literal.
pub fn parse_literal(text: &str) -> Option<f64> {
    let mut lexer = tokenize(text);
    let kind = lexer.next()?.ok()?;
    if lexer.span() != (0..text.len()) {
        return None;
    }

    match kind {
        LiteralKind::Decimal => text.parse().ok(),
        LiteralKind::NaN => Some(f64::NAN),
        LiteralKind::Infinity if text.starts_with('-') => Some(f64::NEG_INFINITY),
        LiteralKind::Infinity => Some(f64::INFINITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<const N: usize>(input: &str, expected: [(LiteralKind, &str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn maximal_munch() {
        compare_tokens("-12.5e+3", [(LiteralKind::Decimal, "-12.5e+3")]);
        compare_tokens("+Infinity", [(LiteralKind::Infinity, "+Infinity")]);
        compare_tokens("1.5.5", [(LiteralKind::Decimal, "1.5"), (LiteralKind::Decimal, ".5")]);
    }

    #[test]
    fn decimal_forms() {
        assert_eq!(parse_literal("13"), Some(13.0));
        assert_eq!(parse_literal("4."), Some(4.0));
        assert_eq!(parse_literal(".25"), Some(0.25));
        assert_eq!(parse_literal("-2"), Some(-2.0));
        assert_eq!(parse_literal("+7.5"), Some(7.5));
        assert_eq!(parse_literal("1e-3"), Some(0.001));
        assert_eq!(parse_literal("2.5E2"), Some(250.0));
    }

    #[test]
    fn special_values() {
        assert!(parse_literal("NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_literal("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_literal("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn not_literals() {
        for text in ["", ".", "-", "1e", "e5", "x", "1.5.5", "0x1p3", "2.5f", "1+2", "--1", "inf"] {
            assert_eq!(parse_literal(text), None, "`{}` must not be a literal", text);
        }
    }
}
