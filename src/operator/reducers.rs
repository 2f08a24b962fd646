//! The standard reducers: eager operators that consume a whole sequence.
//!
//! A reducer pulls until its input is exhausted, so a reducer over an
//! unbounded sequence never returns.

use std::rc::Rc;

use super::{Arguments, OperatorTable, Reducer};
use crate::error::OperatorError;
use crate::value::{Sequence, Value, usize_to_f64};

/// Every standard reducer, in alphabetical order.
pub fn standard_reducers() -> OperatorTable<Reducer> {
    OperatorTable::new()
        .with("forEach", Rc::new(for_each) as Reducer)
        .with("reduce", Rc::new(reduce))
        .with("toArray", Rc::new(to_array))
}

/// Calls `function(item, index)` for every element and returns `undefined`.
///
/// # Errors
///
/// The first argument is not a function.
pub fn for_each(arguments: &[Value], input: Sequence) -> Result<Value, OperatorError> {
    let function = Arguments::new("forEach", arguments).function(0)?;
    for (index, item) in input.iter().enumerate() {
        function.call(&[item, Value::Number(usize_to_f64(index))]);
    }
    Ok(Value::Undefined)
}

/// Left fold: `function(accumulator, item)` for every element, starting
/// from `initial`. An empty input returns `initial`.
///
/// # Errors
///
/// The first argument is not a function. A missing `initial` folds from
/// `undefined`.
pub fn reduce(arguments: &[Value], input: Sequence) -> Result<Value, OperatorError> {
    let arguments = Arguments::new("reduce", arguments);
    let function = arguments.function(0)?;
    let initial = arguments.optional(1).cloned().unwrap_or_default();
    Ok(input
        .iter()
        .fold(initial, |accumulator, item| function.call(&[accumulator, item])))
}

/// Collects the elements into an array, in order.
///
/// # Errors
///
/// Never; the signature matches the other reducers.
pub fn to_array(_arguments: &[Value], input: Sequence) -> Result<Value, OperatorError> {
    Ok(Value::Array(input.iter().collect()))
}
