//! # lazychain
//!
//! Lazy sequence operators and a chainable builder driven by open operator
//! tables.
//!
//! ## Overview
//!
//! Every operator pulls one element at a time through the whole pipeline,
//! so `filter(..).map(..).take(5)` never builds an intermediate collection
//! and stops pulling as soon as five elements have come out. The crate has
//! two layers:
//!
//! - **Typed iterators** ([`iter`]): generic, zero-cost generators and
//!   adapters such as `range`, `zip_all`, `chunk` and `diff`, plus the
//!   [`Restartable`](iter::Restartable) capability for sources that can be
//!   traversed more than once.
//! - **Dynamic chains** ([`value`], [`operator`], [`chain`]): a dynamically
//!   typed [`Value`](value::Value) model, open operator tables keyed by name,
//!   and a [`Builder`](chain::Builder) that turns three such tables into a
//!   chainable method surface.
//!
//! ## Feature Flags
//!
//! - `iter`: the typed iterator layer
//! - `value`: the dynamic value model and lazy `Sequence`
//! - `chain`: operator tables, `Builder` and `Chainable`
//! - `serde`: `Serialize`/`Deserialize` for `Value`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazychain::prelude::*;
//!
//! let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! let sink = std::rc::Rc::clone(&log);
//! let record = Function::unary(move |x| {
//!     sink.borrow_mut().push(x.as_f64().unwrap_or(0.0) * 2.0);
//!     Value::Undefined
//! });
//!
//! let values = chainable().range([3])?.tap(record)?.to_array()?;
//! assert_eq!(values, lazychain::value!([0, 1, 2]));
//! assert_eq!(*log.borrow(), vec![0.0, 2.0, 4.0]);
//! # Ok::<(), OperatorError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the traits and types most pipelines need.
///
/// # Usage
///
/// ```rust
/// use lazychain::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "iter")]
    pub use crate::iter::{Decision, Factory, Replay, Restartable, SequenceExt};

    #[cfg(feature = "value")]
    pub use crate::error::{OperatorError, OperatorKind};

    #[cfg(feature = "value")]
    pub use crate::value::{Capability, Function, Sequence, Value};

    #[cfg(feature = "chain")]
    pub use crate::operator::{Arguments, Generator, OperatorTable, Reducer, Transform};

    #[cfg(feature = "chain")]
    pub use crate::chain::{Builder, Chainable, Invoked, Tables, chainable, custom_builder};
}

#[cfg(feature = "iter")]
pub mod iter;

#[cfg(feature = "value")]
pub mod error;

#[cfg(feature = "value")]
pub mod value;

#[cfg(feature = "chain")]
pub mod operator;

#[cfg(feature = "chain")]
pub mod chain;
