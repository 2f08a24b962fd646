//! The chain: one mutable holder of the current sequence.

use std::fmt;

use super::builder::{Builder, Method};
use crate::error::{OperatorError, OperatorKind};
use crate::value::{Sequence, Value, Values};

/// The result of [`Chainable::invoke`].
#[derive(Debug)]
pub enum Invoked<'a> {
    /// A transform ran; the chain continues.
    Chain(&'a mut Chainable),
    /// A reducer ran and produced this value.
    Value(Value),
}

impl Invoked<'_> {
    /// The reducer's value, or `None` if a transform ran.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Chain(_) => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// Threads one lazy sequence through successive operator calls.
///
/// Transform methods replace the held sequence and return the same
/// `Chainable`, so a pipeline reads as a chain of calls on one object.
/// Reducer methods consume the held sequence and return a plain [`Value`].
/// Iterating a `Chainable` iterates whatever sequence it currently holds.
///
/// # Examples
///
/// ```rust
/// use lazychain::chain::chainable;
/// use lazychain::value::{Function, Value};
///
/// let mut chain = chainable().chain_value(&lazychain::value!([1, 2, 3, 4]))?;
/// let odd = Function::unary(|x| Value::from(x.as_f64().is_some_and(|n| n % 2.0 == 1.0)));
/// let add = Function::binary(|a, b| {
///     Value::from(a.as_f64().unwrap_or(0.0) + b.as_f64().unwrap_or(0.0))
/// });
///
/// chain.apply("filter", &[odd.into()])?;
/// let total = chain.finish("reduce", &[add.into(), Value::from(0)])?;
/// assert_eq!(total, Value::from(4));
/// # Ok::<(), lazychain::error::OperatorError>(())
/// ```
pub struct Chainable {
    builder: Builder,
    sequence: Sequence,
}

impl Chainable {
    pub(crate) const fn new(builder: Builder, sequence: Sequence) -> Self {
        Self { builder, sequence }
    }

    /// Runs the transform `name` over the held sequence and holds its
    /// output instead.
    ///
    /// # Errors
    ///
    /// [`OperatorError::UnknownOperator`] if this chain's builder has no
    /// transform of that name, or whatever the transform reports about its
    /// arguments. On error the held sequence is unchanged.
    pub fn apply(&mut self, name: &str, arguments: &[Value]) -> Result<&mut Self, OperatorError> {
        match self.builder.method(name) {
            Some(Method::Transform(transform)) => {
                self.sequence = transform(arguments, self.sequence.clone())?;
                Ok(self)
            }
            _ => Err(OperatorError::unknown(OperatorKind::Transform, name)),
        }
    }

    /// Runs the reducer `name` over the held sequence.
    ///
    /// # Errors
    ///
    /// [`OperatorError::UnknownOperator`] if this chain's builder has no
    /// reducer of that name, or whatever the reducer reports about its
    /// arguments.
    pub fn finish(&self, name: &str, arguments: &[Value]) -> Result<Value, OperatorError> {
        match self.builder.method(name) {
            Some(Method::Reducer(reducer)) => reducer(arguments, self.sequence.clone()),
            _ => Err(OperatorError::unknown(OperatorKind::Reducer, name)),
        }
    }

    /// Calls the method `name`, whichever table it came from.
    ///
    /// # Errors
    ///
    /// [`OperatorError::UnknownOperator`] if this chain has no such method,
    /// or whatever the operator reports about its arguments.
    pub fn invoke(&mut self, name: &str, arguments: &[Value]) -> Result<Invoked<'_>, OperatorError> {
        match self.builder.method(name) {
            Some(Method::Transform(transform)) => {
                self.sequence = transform(arguments, self.sequence.clone())?;
                Ok(Invoked::Chain(self))
            }
            Some(Method::Reducer(reducer)) => {
                reducer(arguments, self.sequence.clone()).map(Invoked::Value)
            }
            None => Err(OperatorError::unknown(OperatorKind::Method, name)),
        }
    }

    /// The currently held sequence.
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// The builder this chain came from.
    pub const fn builder(&self) -> &Builder {
        &self.builder
    }

    /// Starts a traversal of the held sequence.
    pub fn iter(&self) -> Values {
        self.sequence.iter()
    }

    /// Unwraps the held sequence.
    pub fn into_sequence(self) -> Sequence {
        self.sequence
    }
}

impl IntoIterator for &Chainable {
    type Item = Value;
    type IntoIter = Values;

    fn into_iter(self) -> Values {
        self.iter()
    }
}

impl From<Chainable> for Sequence {
    fn from(chain: Chainable) -> Self {
        chain.into_sequence()
    }
}

impl From<Chainable> for Value {
    fn from(chain: Chainable) -> Self {
        Self::Sequence(chain.into_sequence())
    }
}

impl fmt::Debug for Chainable {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Chainable")
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_not_impl_any!(Chainable: Send, Sync);
static_assertions::assert_not_impl_any!(Builder: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;
    use crate::value::Function;
    use rstest::rstest;

    fn chain_of(values: Value) -> Chainable {
        Builder::standard().chain_value(&values).unwrap()
    }

    #[rstest]
    fn apply_returns_the_same_chain() {
        let mut chain = chain_of(value!([1, 2]));
        let address: *const Chainable = &chain;
        let identity = Function::unary(Value::clone);
        let returned = chain.apply("map", &[identity.into()]).unwrap();
        assert!(std::ptr::eq(returned, address));
    }

    #[rstest]
    fn apply_rejects_reducers_and_finish_rejects_transforms() {
        let mut chain = chain_of(value!([1]));
        assert_eq!(
            chain.apply("toArray", &[]).unwrap_err(),
            OperatorError::unknown(OperatorKind::Transform, "toArray")
        );
        assert_eq!(
            chain.finish("flatten", &[]).unwrap_err(),
            OperatorError::unknown(OperatorKind::Reducer, "flatten")
        );
    }

    #[rstest]
    fn failed_apply_keeps_the_sequence() {
        let mut chain = chain_of(value!([1, 2]));
        let before = chain.sequence().clone();
        assert!(chain.apply("take", &[Value::from("two")]).is_err());
        assert_eq!(chain.sequence(), &before);
    }

    #[rstest]
    fn invoke_dispatches_either_kind() {
        let mut chain = chain_of(value!([[1], [2, 3]]));
        assert!(matches!(chain.invoke("flatten", &[]), Ok(Invoked::Chain(_))));
        let array = chain.invoke("toArray", &[]).unwrap().into_value();
        assert_eq!(array, Some(value!([1, 2, 3])));
        assert_eq!(
            chain.invoke("sort", &[]).unwrap_err(),
            OperatorError::unknown(OperatorKind::Method, "sort")
        );
    }

    #[rstest]
    fn chains_iterate_their_current_sequence() {
        let mut chain = chain_of(value!([1, 2, 3]));
        chain.apply("take", &[Value::from(2)]).unwrap();
        let collected: Vec<Value> = (&chain).into_iter().collect();
        assert_eq!(collected, vec![Value::from(1), Value::from(2)]);
        assert_eq!(chain.iter().count(), 2);
    }

    #[rstest]
    fn chains_feed_other_sequences() {
        let inner = chain_of(value!([1, 2]));
        let outer = chain_of(Value::array([Value::from(inner), Value::from(3)]));
        let flat = Sequence::from(outer);
        let mut chain = Builder::standard().chain(flat);
        chain.apply("flatten", &[]).unwrap();
        assert_eq!(chain.finish("toArray", &[]), Ok(value!([1, 2, 3])));
    }
}
