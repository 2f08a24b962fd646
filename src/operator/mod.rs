//! Operator tables and the standard operator set.
//!
//! An operator table is an ordered, open mapping from name to operator. The
//! three operator shapes are fixed by type, so the upstream sequence is
//! always the final parameter:
//!
//! | kind        | shape                                         |
//! |-------------|-----------------------------------------------|
//! | [`Generator`] | `(arguments) -> Sequence`                   |
//! | [`Transform`] | `(arguments, upstream) -> Sequence`         |
//! | [`Reducer`]   | `(arguments, upstream) -> Value`            |
//!
//! [`standard_generators`], [`standard_transforms`] and
//! [`standard_reducers`] build fresh copies of the standard tables, which
//! callers may trim, extend or replace before handing them to a builder.
//!
//! # Examples
//!
//! ```rust
//! use lazychain::operator::{self, OperatorTable, Transform};
//! use lazychain::value::{Sequence, Value};
//! use std::rc::Rc;
//!
//! let skip_one: Transform = operator::transform(|_arguments, input| {
//!     Ok(Sequence::derive(&[input.clone()], move || input.iter().skip(1)))
//! });
//! let table: OperatorTable<Transform> =
//!     operator::standard_transforms().with("skipOne", skip_one);
//!
//! let skip = Rc::clone(table.get("skipOne").unwrap());
//! let output = skip(&[], Sequence::from(vec![Value::from(1), Value::from(2)])).unwrap();
//! assert_eq!(output.to_vec(), vec![Value::from(2)]);
//! ```

mod arguments;
mod generators;
mod reducers;
mod table;
mod transforms;

use std::rc::Rc;

use crate::error::OperatorError;
use crate::value::{Sequence, Value};

pub use arguments::Arguments;
pub use generators::{
    concatenate, from, range, repeat, repeat_iterable, standard_generators, zip, zip_all,
};
pub use reducers::{for_each, reduce, standard_reducers, to_array};
pub use table::OperatorTable;
pub use transforms::{
    array_to_object, chunk, diff, filter, flatten, flatten_per_function, flatten_recursive, map,
    map_with, nth, pluck, reject, standard_transforms, take, take_while, tap,
};

/// Starts a sequence from positional arguments.
pub type Generator = Rc<dyn Fn(&[Value]) -> Result<Sequence, OperatorError>>;

/// Derives a new lazy sequence from positional arguments and the upstream
/// sequence.
pub type Transform = Rc<dyn Fn(&[Value], Sequence) -> Result<Sequence, OperatorError>>;

/// Consumes the upstream sequence into a single value.
pub type Reducer = Rc<dyn Fn(&[Value], Sequence) -> Result<Value, OperatorError>>;

/// Wraps a closure as a [`Generator`].
pub fn generator<F>(function: F) -> Generator
where
    F: Fn(&[Value]) -> Result<Sequence, OperatorError> + 'static,
{
    Rc::new(function)
}

/// Wraps a closure as a [`Transform`].
pub fn transform<F>(function: F) -> Transform
where
    F: Fn(&[Value], Sequence) -> Result<Sequence, OperatorError> + 'static,
{
    Rc::new(function)
}

/// Wraps a closure as a [`Reducer`].
pub fn reducer<F>(function: F) -> Reducer
where
    F: Fn(&[Value], Sequence) -> Result<Value, OperatorError> + 'static,
{
    Rc::new(function)
}
