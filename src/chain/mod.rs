//! Chainable pipelines assembled from operator tables.
//!
//! A [`Builder`] is assembled once from three [`OperatorTable`]s:
//!
//! - every generator becomes a builder-level entry point that starts a chain
//!   ([`Builder::generate`], or a named method such as [`Builder::range`])
//! - every transform becomes a chain method that replaces the chain's
//!   sequence and returns the same [`Chainable`] ([`Chainable::apply`])
//! - every reducer becomes a chain method that consumes the sequence and
//!   returns a plain [`Value`](crate::value::Value) ([`Chainable::finish`])
//!
//! [`chainable`] returns the builder over the standard tables. Builders
//! from [`custom_builder`] own their tables outright and never affect the
//! standard one.
//!
//! # Examples
//!
//! ```rust
//! use lazychain::chain::{chainable, custom_builder, Tables};
//! use lazychain::value::{Function, Value};
//!
//! let evens = Function::unary(|x| Value::from(x.as_f64().is_some_and(|n| n % 2.0 == 0.0)));
//! let result = chainable().range([10])?.filter(evens)?.take(3)?.to_array()?;
//! assert_eq!(result, lazychain::value!([0, 2, 4]));
//!
//! let standard = Tables::standard();
//! let minimal = custom_builder(
//!     standard.generators.select(&["from"]),
//!     standard.transforms.select(&["take"]),
//!     standard.reducers.select(&["toArray"]),
//! );
//! assert_eq!(minimal.method_names().collect::<Vec<_>>(), vec!["take", "toArray"]);
//! assert!(chainable().has_method("map"));
//! # Ok::<(), lazychain::error::OperatorError>(())
//! ```

mod builder;
mod chainable;
mod methods;

pub use builder::{Builder, Tables};
pub use chainable::{Chainable, Invoked};

use crate::operator::{Generator, OperatorTable, Reducer, Transform};

thread_local! {
    static STANDARD: Builder = Builder::standard();
}

/// The builder over the standard operator tables.
///
/// It is assembled once per thread; every call returns a handle to the same
/// builder.
pub fn chainable() -> Builder {
    STANDARD.with(Builder::clone)
}

/// Assembles an independent builder from caller-supplied tables.
///
/// [`Tables::standard`] provides the standard tables as a starting point.
pub fn custom_builder(
    generators: OperatorTable<Generator>,
    transforms: OperatorTable<Transform>,
    reducers: OperatorTable<Reducer>,
) -> Builder {
    Builder::new(generators, transforms, reducers)
}
