//! Expression trees over the single variable `x`.
//!
//! An [`Expr`] is built fully formed, either by the parser in `dx-parser` or by the constructor
//! functions on [`Expr`] itself, and is never mutated afterwards. Every tree owns its children, so
//! the trees returned by [`Expr::deep_copy`] and [`Expr::differentiate`] never share a node with
//! any other tree.
//!
//! ```
//! use dx_tree::Expr;
//!
//! // 3x^2
//! let expr = Expr::product(Expr::literal(3.0), Expr::power(Expr::variable(), Expr::literal(2.0)));
//! assert_eq!(expr.evaluate(2.0), 12.0);
//! assert_eq!(expr.differentiate().unwrap().evaluate(2.0), 12.0);
//! assert_eq!(expr.to_string(), "3*x^2");
//! ```

pub mod derivative;
pub mod error;
pub mod expr;
pub mod fmt;
pub mod op;

pub use error::NotDifferentiable;
pub use expr::{Binary, Expr, Unary};
pub use op::{Associativity, BinOp, PowerForm, Precedence, UnaryOp};
