//! Typed reads of an operator's positional arguments.

use crate::error::OperatorError;
use crate::value::{Function, Sequence, Value};

/// A read-only view of the arguments passed to one operator call.
///
/// Every accessor names the operator and the position in the error it
/// returns, so the standard operators validate their arguments in one line
/// each.
///
/// # Examples
///
/// ```rust
/// use lazychain::operator::Arguments;
/// use lazychain::value::Value;
///
/// let values = [Value::from(3), Value::from("name")];
/// let arguments = Arguments::new("example", &values);
/// assert_eq!(arguments.count(0), Ok(3));
/// assert_eq!(arguments.key(1), Ok("name".to_string()));
/// assert!(arguments.function(0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    operator: &'a str,
    values: &'a [Value],
}

impl<'a> Arguments<'a> {
    /// Wraps the arguments of a call to `operator`.
    pub const fn new(operator: &'a str, values: &'a [Value]) -> Self {
        Self { operator, values }
    }

    /// The number of arguments supplied.
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no arguments were supplied.
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The argument at `position`, or `None`.
    pub fn optional(&self, position: usize) -> Option<&'a Value> {
        self.values.get(position)
    }

    /// The argument at `position`.
    ///
    /// # Errors
    ///
    /// [`OperatorError::MissingArgument`] if too few arguments were passed.
    pub fn value(&self, position: usize) -> Result<&'a Value, OperatorError> {
        self.optional(position)
            .ok_or_else(|| OperatorError::MissingArgument {
                operator: self.operator.to_string(),
                position,
            })
    }

    /// The function at `position`.
    ///
    /// # Errors
    ///
    /// Missing argument, or a value that is not a function.
    pub fn function(&self, position: usize) -> Result<Function, OperatorError> {
        let value = self.value(position)?;
        value
            .as_function()
            .cloned()
            .ok_or_else(|| self.mismatch(position, "a function", value))
    }

    /// The number at `position`.
    ///
    /// # Errors
    ///
    /// Missing argument, or a value that is not a number.
    pub fn number(&self, position: usize) -> Result<f64, OperatorError> {
        let value = self.value(position)?;
        value
            .as_f64()
            .ok_or_else(|| self.mismatch(position, "a number", value))
    }

    /// The number at `position` read as an element count.
    ///
    /// Counts compare like `i < n`: fractional counts round up, zero,
    /// negative and `NaN` counts are zero, and infinity saturates.
    ///
    /// # Errors
    ///
    /// Missing argument, or a value that is not a number.
    pub fn count(&self, position: usize) -> Result<usize, OperatorError> {
        self.number(position).map(count_from)
    }

    /// The number at `position` read as an optional bound: positive
    /// infinity means "no bound".
    ///
    /// # Errors
    ///
    /// Missing argument, or a value that is not a number.
    pub fn bound(&self, position: usize) -> Result<Option<usize>, OperatorError> {
        self.number(position).map(|number| {
            if number == f64::INFINITY {
                None
            } else {
                Some(count_from(number))
            }
        })
    }

    /// The argument at `position` rendered as a property name.
    ///
    /// # Errors
    ///
    /// [`OperatorError::MissingArgument`] if too few arguments were passed.
    pub fn key(&self, position: usize) -> Result<String, OperatorError> {
        self.value(position).map(Value::to_key)
    }

    /// The iterable at `position` as a [`Sequence`].
    ///
    /// # Errors
    ///
    /// Missing argument, or a value that is not iterable.
    pub fn sequence(&self, position: usize) -> Result<Sequence, OperatorError> {
        Sequence::from_value(self.value(position)?, self.operator)
    }

    /// Every argument from `start` on, each as a [`Sequence`].
    ///
    /// # Errors
    ///
    /// The first argument that is not iterable.
    pub fn sequences_from(&self, start: usize) -> Result<Vec<Sequence>, OperatorError> {
        self.values
            .iter()
            .skip(start)
            .map(|value| Sequence::from_value(value, self.operator))
            .collect()
    }

    fn mismatch(&self, position: usize, expected: &'static str, found: &Value) -> OperatorError {
        OperatorError::ArgumentType {
            operator: self.operator.to_string(),
            position,
            expected,
            found: found.type_name(),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from(number: f64) -> usize {
    if number.is_nan() || number <= 0.0 {
        0
    } else {
        number.ceil() as usize
    }
}
