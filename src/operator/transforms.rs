//! The standard transforms: lazy operators from one sequence to another.
//!
//! Every transform validates its arguments when it is invoked and then
//! returns without pulling a single element. Each traversal of the output
//! starts a traversal of the input, so the output is restartable exactly
//! when the input is.

use std::rc::Rc;

use super::{Arguments, OperatorTable, Transform};
use crate::error::OperatorError;
use crate::iter::{Decision, SequenceExt};
use crate::value::{Sequence, Value, Values, usize_to_f64};

/// Every standard transform, in alphabetical order.
pub fn standard_transforms() -> OperatorTable<Transform> {
    OperatorTable::new()
        .with("arrayToObject", Rc::new(array_to_object) as Transform)
        .with("chunk", Rc::new(chunk))
        .with("diff", Rc::new(diff))
        .with("filter", Rc::new(filter))
        .with("flatten", Rc::new(flatten))
        .with("flattenPerFunction", Rc::new(flatten_per_function))
        .with("flattenRecursive", Rc::new(flatten_recursive))
        .with("map", Rc::new(map))
        .with("mapWith", Rc::new(map_with))
        .with("nth", Rc::new(nth))
        .with("pluck", Rc::new(pluck))
        .with("reject", Rc::new(reject))
        .with("take", Rc::new(take))
        .with("takeWhile", Rc::new(take_while))
        .with("tap", Rc::new(tap))
}

fn lazily<F, I>(input: Sequence, adapt: F) -> Sequence
where
    F: Fn(Values) -> I + 'static,
    I: Iterator<Item = Value> + 'static,
{
    let upstream = [input.clone()];
    Sequence::derive(&upstream, move || adapt(input.iter()))
}

// =============================================================================
// Element-wise
// =============================================================================

/// `function(x)` for every element.
///
/// # Errors
///
/// The first argument is not a function.
pub fn map(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let function = Arguments::new("map", arguments).function(0)?;
    Ok(lazily(input, move |values| {
        let function = function.clone();
        values.map(move |item| function.call1(&item))
    }))
}

/// Keeps the elements for which `function` returns exactly `true`.
///
/// # Errors
///
/// The first argument is not a function.
pub fn filter(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let function = Arguments::new("filter", arguments).function(0)?;
    Ok(lazily(input, move |values| {
        let function = function.clone();
        values.filter(move |item| function.call1(item).is_true())
    }))
}

/// Drops the elements for which `function` returns exactly `true`.
///
/// # Errors
///
/// The first argument is not a function.
pub fn reject(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let function = Arguments::new("reject", arguments).function(0)?;
    Ok(lazily(input, move |values| {
        let function = function.clone();
        values.filter(move |item| !function.call1(item).is_true())
    }))
}

/// Calls `function` on every element for its side effect and passes the
/// element through unchanged.
///
/// # Errors
///
/// The first argument is not a function.
pub fn tap(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let function = Arguments::new("tap", arguments).function(0)?;
    Ok(lazily(input, move |values| {
        let function = function.clone();
        values.inspect(move |item| {
            function.call1(item);
        })
    }))
}

/// The named field of every element; `undefined` where it is missing.
///
/// # Errors
///
/// No field name was given.
pub fn pluck(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let name: Rc<str> = Arguments::new("pluck", arguments).key(0)?.into();
    Ok(lazily(input, move |values| {
        let name = Rc::clone(&name);
        values.map(move |item| item.get(&name))
    }))
}

/// The `index`-th entry of every element. A negative index counts back from
/// the end of each element; entries that do not exist are `undefined`.
///
/// # Errors
///
/// The first argument is not a number.
pub fn nth(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let index = Arguments::new("nth", arguments).number(0)?;
    Ok(lazily(input, move |values| {
        values.map(move |item| entry(&item, index))
    }))
}

fn entry(item: &Value, index: f64) -> Value {
    let position = if index < 0.0 {
        match item.length() {
            Some(length) => usize_to_f64(length) + index,
            None => return Value::Undefined,
        }
    } else {
        index
    };
    item.get(&Value::Number(position).to_key())
}

/// Pairs each property name with the element's value at the same position.
///
/// Names past the end of an element map to `undefined`; values past the
/// last name are dropped. The names are read once, when the transform is
/// invoked.
///
/// # Errors
///
/// The first argument is not iterable.
pub fn array_to_object(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let names: Rc<[String]> = Arguments::new("arrayToObject", arguments)
        .sequence(0)?
        .iter()
        .map(|name| name.to_key())
        .collect();
    Ok(lazily(input, move |values| {
        let names = Rc::clone(&names);
        values.map(move |item| {
            let mut cells = item.iter().unwrap_or_else(Values::empty);
            Value::object(
                names
                    .iter()
                    .map(|name| (name.clone(), cells.next().unwrap_or_default())),
            )
        })
    }))
}

// =============================================================================
// Bounding and grouping
// =============================================================================

/// The first `count` elements. Stops pulling once `count` is reached.
///
/// # Errors
///
/// The first argument is not a number.
pub fn take(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let count = Arguments::new("take", arguments).count(0)?;
    Ok(lazily(input, move |values| values.take(count)))
}

/// Elements up to, not including, the first one for which `function` does
/// not return exactly `true`.
///
/// # Errors
///
/// The first argument is not a function.
pub fn take_while(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let function = Arguments::new("takeWhile", arguments).function(0)?;
    Ok(lazily(input, move |values| {
        let function = function.clone();
        values.take_while(move |item| function.call1(item).is_true())
    }))
}

/// Arrays of `size` consecutive elements; the last may be shorter.
///
/// A group closes only when its length equals `size`, so a size that is
/// not a positive integer collects the whole input into one group.
///
/// # Errors
///
/// The first argument is not a number.
pub fn chunk(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let size = group_size(Arguments::new("chunk", arguments).number(0)?);
    Ok(lazily(input, move |values| values.chunk(size).map(Value::from)))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn group_size(size: f64) -> usize {
    if size.is_finite() && size >= 1.0 && size.fract() == 0.0 {
        size as usize
    } else {
        0
    }
}

/// `function(previous, current)` for every adjacent pair.
///
/// # Errors
///
/// The first argument is not a function.
pub fn diff(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let function = Arguments::new("diff", arguments).function(0)?;
    Ok(lazily(input, move |values| {
        let function = function.clone();
        values.diff(move |previous, current| function.call(&[previous.clone(), current.clone()]))
    }))
}

// =============================================================================
// Flattening
// =============================================================================

/// Splices iterable elements one level deep. Text is never spliced.
///
/// # Errors
///
/// Never; the signature matches the other transforms.
pub fn flatten(_arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    Ok(lazily(input, |values| values.flatten_per_function(splice)))
}

/// Splices iterable elements at every depth. Text is never spliced.
///
/// # Errors
///
/// Never; the signature matches the other transforms.
pub fn flatten_recursive(_arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    Ok(lazily(input, |values| values.flatten_per_function(splice_recursive)))
}

fn splice(item: Value) -> Decision<Value, Values> {
    if matches!(item, Value::Text(_)) {
        return Decision::Yield(item);
    }
    match item.iter() {
        Some(values) => Decision::Iterate(values),
        None => Decision::Yield(item),
    }
}

fn splice_recursive(item: Value) -> Decision<Value, Values> {
    match splice(item) {
        Decision::Iterate(values) => {
            Decision::Iterate(Values::new(values.flatten_per_function(splice_recursive)))
        }
        keep => keep,
    }
}

/// Flattens according to the decision record `function` returns for each
/// element: when its `iterate` field is truthy the elements of
/// `itemToYield` are spliced in, otherwise `itemToYield` itself is emitted.
///
/// # Errors
///
/// The first argument is not a function.
///
/// # Panics
///
/// Iterating the output panics when a decision asks to iterate an
/// `itemToYield` that is not iterable.
pub fn flatten_per_function(
    arguments: &[Value],
    input: Sequence,
) -> Result<Sequence, OperatorError> {
    let function = Arguments::new("flattenPerFunction", arguments).function(0)?;
    Ok(lazily(input, move |values| {
        let function = function.clone();
        values.flatten_per_function(move |item| {
            let record = function.call1(&item);
            let item_to_yield = record.get("itemToYield");
            if !record.get("iterate").is_truthy() {
                return Decision::Yield(item_to_yield);
            }
            match item_to_yield.iter() {
                Some(values) => Decision::Iterate(values),
                None => panic!(
                    "flattenPerFunction: cannot iterate {} `{item_to_yield}`",
                    item_to_yield.type_name()
                ),
            }
        })
    }))
}

// =============================================================================
// Custom
// =============================================================================

/// Hands the whole input, as a sequence value, to `function` and continues
/// with whatever iterable it returns.
///
/// # Errors
///
/// The first argument is not a function, or its result is not iterable.
pub fn map_with(arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let function = Arguments::new("mapWith", arguments).function(0)?;
    let output = function.call1(&Value::Sequence(input));
    Sequence::from_value(&output, "mapWith")
}
