//! The standard generators: operators that start a sequence.
//!
//! | name             | arguments                  | restartable                  |
//! |------------------|----------------------------|------------------------------|
//! | `concatenate`    | iterables...               | if every input is            |
//! | `from`           | iterable                   | as its input                 |
//! | `range`          | `[start,] [length,] [inc]` | yes                          |
//! | `repeat`         | count, value               | yes                          |
//! | `repeatIterable` | count, iterable            | if the input is              |
//! | `zip`            | iterables...               | if every input is            |
//! | `zipAll`         | iterables...               | if every input is            |

use std::rc::Rc;

use super::{Arguments, Generator, OperatorTable};
use crate::error::OperatorError;
use crate::iter::{self, Factory, Range};
use crate::value::{Sequence, Value, Values};

/// Every standard generator, in alphabetical order.
pub fn standard_generators() -> OperatorTable<Generator> {
    OperatorTable::new()
        .with("concatenate", Rc::new(concatenate) as Generator)
        .with("from", Rc::new(from))
        .with("range", Rc::new(range))
        .with("repeat", Rc::new(repeat))
        .with("repeatIterable", Rc::new(repeat_iterable))
        .with("zip", Rc::new(zip))
        .with("zipAll", Rc::new(zip_all))
}

/// Yields every element of each argument in turn.
///
/// # Errors
///
/// Any argument that is not iterable.
pub fn concatenate(arguments: &[Value]) -> Result<Sequence, OperatorError> {
    let inputs = Arguments::new("concatenate", arguments).sequences_from(0)?;
    let upstream = inputs.clone();
    Ok(Sequence::derive(&upstream, move || {
        iter::concatenate(inputs.clone().into_iter().map(|input| input.iter()))
    }))
}

/// Returns its single iterable argument as a sequence, unchanged.
///
/// # Errors
///
/// A missing or non-iterable argument.
pub fn from(arguments: &[Value]) -> Result<Sequence, OperatorError> {
    Arguments::new("from", arguments).sequence(0)
}

/// A numeric progression, overloaded by argument count:
///
/// - `range()` is empty
/// - `range(length)` is `0, 1, ..., length - 1`
/// - `range(start, length)` is `start, start + 1, ...`
/// - `range(start, length, increment)`; further arguments are ignored
///
/// An infinite `length` makes the range unbounded.
///
/// # Errors
///
/// Any argument that is not a number.
pub fn range(arguments: &[Value]) -> Result<Sequence, OperatorError> {
    let arguments = Arguments::new("range", arguments);
    let (start, length, increment) = match arguments.len() {
        0 => (0.0, Some(0), 1.0),
        1 => (0.0, arguments.bound(0)?, 1.0),
        2 => (arguments.number(0)?, arguments.bound(1)?, 1.0),
        _ => (
            arguments.number(0)?,
            arguments.bound(1)?,
            arguments.number(2)?,
        ),
    };
    Ok(Sequence::restartable(move || {
        Range::new(start, length, increment).map(Value::Number)
    }))
}

/// Yields the same value `count` times.
///
/// # Errors
///
/// A missing or non-numeric count. A missing value repeats `undefined`.
pub fn repeat(arguments: &[Value]) -> Result<Sequence, OperatorError> {
    let arguments = Arguments::new("repeat", arguments);
    let count = arguments.count(0)?;
    let value = arguments.optional(1).cloned().unwrap_or_default();
    Ok(Sequence::restartable(move || iter::repeat(count, value.clone())))
}

/// Traverses an iterable `count` times in a row.
///
/// Each pass starts a new traversal of the input, so a single-pass input
/// yields its elements once and then nothing for the remaining passes.
///
/// # Errors
///
/// A non-numeric count, or a missing or non-iterable input.
pub fn repeat_iterable(arguments: &[Value]) -> Result<Sequence, OperatorError> {
    let arguments = Arguments::new("repeatIterable", arguments);
    let count = arguments.count(0)?;
    let input = arguments.sequence(1)?;
    let upstream = [input.clone()];
    Ok(Sequence::derive(&upstream, move || {
        let source = input.clone();
        iter::repeat_iterable(count, Factory::new(move || source.iter()))
    }))
}

/// Arrays of the `n`-th element of every input, stopping as soon as any
/// input is exhausted. No inputs produce an empty sequence.
///
/// # Errors
///
/// Any argument that is not iterable.
pub fn zip(arguments: &[Value]) -> Result<Sequence, OperatorError> {
    let inputs = Arguments::new("zip", arguments).sequences_from(0)?;
    let upstream = inputs.clone();
    Ok(Sequence::derive(&upstream, move || {
        iter::zip(traversals(&inputs)).map(Value::from)
    }))
}

/// Arrays of the `n`-th element of every input, running until every input
/// is exhausted. Exhausted inputs contribute `undefined`.
///
/// # Errors
///
/// Any argument that is not iterable.
pub fn zip_all(arguments: &[Value]) -> Result<Sequence, OperatorError> {
    let inputs = Arguments::new("zipAll", arguments).sequences_from(0)?;
    let upstream = inputs.clone();
    Ok(Sequence::derive(&upstream, move || {
        iter::zip_all(traversals(&inputs)).map(Value::array)
    }))
}

fn traversals(inputs: &[Sequence]) -> Vec<Values> {
    inputs.iter().map(Sequence::iter).collect()
}
