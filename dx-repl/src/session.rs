//! The state kept between lines of input, and the commands that act on it.

use crate::error::{
    kind::{
        CannotDifferentiate,
        DerivativeCount,
        InvalidArgument,
        NoCurrentExpression,
        UnknownCommand,
    },
    Error,
};
use dx_parser::{tokenizer::parse_literal, Parser};
use dx_tree::Expr;
use std::ops::Range;

/// The most derivatives `:diff` takes at once. Every derivative roughly doubles the size of the
/// tree, since the results are never simplified.
pub const MAX_DERIVATIVES: usize = 8;

/// The text printed by `:help`.
const HELP: &str = "\
<expression>  parse an expression in x and make it the current expression
:eval <x>     evaluate the current expression at x
:diff [n]     replace the current expression with its n-th derivative (default 1)
:tree         print the tree of the current expression
:help         print this message";

/// A line of input, split into a command and its argument.
#[derive(Debug, Clone, PartialEq)]
enum Command<'a> {
    /// An expression to parse.
    Expr(&'a str),

    /// `:eval <x>`
    Eval(&'a str),

    /// `:diff [n]`
    Diff,

    /// `:tree`
    Tree,

    /// `:help`
    Help,
}

/// A command name or argument, along with where it sits in the line.
struct Word<'a> {
    text: &'a str,
    span: Range<usize>,
}

impl<'a> Command<'a> {
    /// Splits the line into a command and its argument.
    fn parse(input: &'a str) -> Result<(Self, Word<'a>, Option<Word<'a>>), Error> {
        if !input.starts_with(':') {
            let word = Word { text: input, span: 0..input.len() };
            return Ok((Self::Expr(input), word, None));
        }

        let name_end = input.find(char::is_whitespace).unwrap_or(input.len());
        let name = Word { text: &input[..name_end], span: 0..name_end };
        let rest = &input[name_end..];
        let arg_start = input.len() - rest.trim_start().len();
        let arg = Some(rest.trim())
            .filter(|arg| !arg.is_empty())
            .map(|arg| Word { text: arg, span: arg_start..arg_start + arg.len() });

        let command = match name.text {
            ":eval" => Self::Eval(arg.as_ref().map_or("", |arg| arg.text)),
            ":diff" => Self::Diff,
            ":tree" => Self::Tree,
            ":help" => Self::Help,
            _ => {
                return Err(dx_error::Error::new(
                    vec![name.span.clone()],
                    UnknownCommand { name: name.text.to_string() },
                ).into());
            },
        };
        Ok((command, name, arg))
    }
}

/// Reads the argument of `:diff`, which defaults to 1.
fn derivative_count(arg: Option<&Word>) -> Result<usize, Error> {
    let Some(arg) = arg else {
        return Ok(1);
    };

    let count = arg.text.parse::<usize>().map_err(|_| {
        dx_error::Error::new(vec![arg.span.clone()], InvalidArgument { expected: "a whole number" })
    })?;
    match count {
        1..=MAX_DERIVATIVES => Ok(count),
        _ => Err(dx_error::Error::new(vec![arg.span.clone()], DerivativeCount { count }).into()),
    }
}

/// Holds the current expression and the settings used to parse and print expressions.
#[derive(Debug, Clone)]
pub struct Session {
    /// The last expression entered, or the last derivative taken.
    current: Option<Expr>,

    /// The value of `x` used when printing an expression.
    at: f64,

    /// The maximum nesting depth passed to the parser.
    max_depth: usize,
}

impl Session {
    /// Creates a session with no current expression.
    pub fn new(at: f64, max_depth: usize) -> Self {
        Self { current: None, at, max_depth }
    }

    /// Handles one line of input, returning the text to print.
    ///
    /// Error spans are relative to `input`. The current expression only changes if the whole
    /// line succeeds.
    pub fn process(&mut self, input: &str) -> Result<String, Error> {
        let (command, name, arg) = Command::parse(input)?;
        log::debug!("command: {:?}", command);

        match command {
            Command::Expr(text) => {
                let expr = Parser::new(text).max_depth(self.max_depth).parse()?;
                let output = self.describe(&expr);
                self.current = Some(expr);
                Ok(output)
            },
            Command::Eval(text) => {
                let expr = self.require_current(&name)?;
                let span = arg.map_or(name.span.end..name.span.end, |arg| arg.span);
                let x = parse_literal(text).ok_or_else(|| {
                    dx_error::Error::new(vec![span], InvalidArgument { expected: "a number" })
                })?;
                Ok(expr.evaluate(x).to_string())
            },
            Command::Diff => {
                let count = derivative_count(arg.as_ref())?;
                let mut expr = self.require_current(&name)?.deep_copy();
                for _ in 0..count {
                    expr = expr.differentiate().map_err(|err| {
                        let kind = CannotDifferentiate::from(err);
                        dx_error::Error::new(vec![name.span.clone()], kind)
                    })?;
                }
                let output = self.describe(&expr);
                self.current = Some(expr);
                Ok(output)
            },
            Command::Tree => Ok(self.require_current(&name)?.convert_to_string(0)),
            Command::Help => Ok(HELP.to_string()),
        }
    }

    /// Returns the current expression, or an error pointing at the command that needs it.
    fn require_current(&self, name: &Word) -> Result<&Expr, Error> {
        self.current.as_ref().ok_or_else(|| {
            dx_error::Error::new(vec![name.span.clone()], NoCurrentExpression).into()
        })
    }

    /// Prints the tree of the expression, followed by its infix form and its value at the
    /// configured point.
    fn describe(&self, expr: &Expr) -> String {
        format!("{}{}\nat x = {}: {}", expr.tree(), expr, self.at, expr.evaluate(self.at))
    }
}
