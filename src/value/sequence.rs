//! The dynamic lazy sequence.
//!
//! A [`Sequence`] is either *restartable* (every traversal starts from the
//! beginning) or *single-pass* (every traversal continues wherever the
//! previous one stopped). The two are told apart by
//! [`Sequence::capability`]. A sequence derived from a single-pass upstream
//! through [`Sequence::derive`] is itself single-pass.
//!
//! Operators that need to traverse their input more than once, such as
//! `repeatIterable`, only behave as expected on restartable sequences. A
//! single-pass input is not an error; it simply runs dry after the first
//! traversal.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::error::OperatorError;

/// Whether a [`Sequence`] can be traversed more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Every traversal produces a fresh iterator from the start.
    Restartable,
    /// All traversals share one iterator, which is spent after one pass.
    SinglePass,
}

/// A boxed iterator over [`Value`]s.
pub struct Values(Box<dyn Iterator<Item = Value>>);

impl Values {
    /// Boxes an iterator.
    pub fn new<I>(iterator: I) -> Self
    where
        I: Iterator<Item = Value> + 'static,
    {
        Self(Box::new(iterator))
    }

    /// An iterator that yields nothing.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub(crate) fn from_array(values: Rc<[Value]>) -> Self {
        Self::new(ArrayCursor {
            values,
            position: 0,
        })
    }

    pub(crate) fn from_text(text: Rc<str>) -> Self {
        Self::new(TextCursor { text, offset: 0 })
    }
}

impl Iterator for Values {
    type Item = Value;

    #[inline]
    fn next(&mut self) -> Option<Value> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Values(..)")
    }
}

struct ArrayCursor {
    values: Rc<[Value]>,
    position: usize,
}

impl Iterator for ArrayCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let value = self.values.get(self.position)?.clone();
        self.position += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

struct TextCursor {
    text: Rc<str>,
    offset: usize,
}

impl Iterator for TextCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let character = self.text[self.offset..].chars().next()?;
        self.offset += character.len_utf8();
        Some(Value::from(character.to_string()))
    }
}

/// Pulls from the iterator shared by every handle of a single-pass sequence.
struct SharedCursor(Rc<RefCell<Values>>);

impl Iterator for SharedCursor {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.0.borrow_mut().next()
    }
}

type IteratorFactory = dyn Fn() -> Values;

#[derive(Clone)]
enum Source {
    Factory {
        factory: Rc<IteratorFactory>,
        capability: Capability,
    },
    Shared(Rc<RefCell<Values>>),
}

/// A lazily evaluated, dynamically typed sequence.
///
/// Cloning a `Sequence` is cheap and shares the underlying source: clones of
/// a single-pass sequence drain the same iterator.
///
/// # Examples
///
/// ```rust
/// use lazychain::value::{Capability, Sequence, Value};
///
/// let restartable = Sequence::from_values(vec![Value::from(1), Value::from(2)]);
/// assert_eq!(restartable.capability(), Capability::Restartable);
/// assert_eq!(restartable.iter().count(), 2);
/// assert_eq!(restartable.iter().count(), 2);
///
/// let once = Sequence::single_pass((0..2).map(Value::from));
/// assert_eq!(once.capability(), Capability::SinglePass);
/// assert_eq!(once.iter().count(), 2);
/// assert_eq!(once.iter().count(), 0);
/// ```
#[derive(Clone)]
pub struct Sequence {
    source: Source,
}

impl Sequence {
    /// A restartable sequence: `factory` is called for every traversal.
    pub fn restartable<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Iterator<Item = Value> + 'static,
    {
        Self::with_capability(Capability::Restartable, factory)
    }

    /// A sequence computed from `upstream` sequences.
    ///
    /// `factory` runs once per traversal and is expected to start a fresh
    /// traversal of each upstream sequence. The result is restartable only
    /// if every upstream sequence is; over a single-pass upstream, each
    /// traversal picks up wherever the upstream cursor was left.
    pub fn derive<F, I>(upstream: &[Self], factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Iterator<Item = Value> + 'static,
    {
        let capability = if upstream.iter().all(Self::is_restartable) {
            Capability::Restartable
        } else {
            Capability::SinglePass
        };
        Self::with_capability(capability, factory)
    }

    fn with_capability<F, I>(capability: Capability, factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Iterator<Item = Value> + 'static,
    {
        Self {
            source: Source::Factory {
                factory: Rc::new(move || Values::new(factory())),
                capability,
            },
        }
    }

    /// A single-pass sequence over one iterator.
    pub fn single_pass<I>(iterator: I) -> Self
    where
        I: Iterator<Item = Value> + 'static,
    {
        Self {
            source: Source::Shared(Rc::new(RefCell::new(Values::new(iterator)))),
        }
    }

    /// A restartable sequence over a fixed list of values.
    pub fn from_values(values: impl Into<Rc<[Value]>>) -> Self {
        let values: Rc<[Value]> = values.into();
        Self::restartable(move || Values::from_array(Rc::clone(&values)))
    }

    /// A restartable sequence that yields nothing.
    pub fn empty() -> Self {
        Self::restartable(std::iter::empty)
    }

    /// Reports whether the sequence can be traversed more than once.
    pub const fn capability(&self) -> Capability {
        match self.source {
            Source::Factory { capability, .. } => capability,
            Source::Shared(_) => Capability::SinglePass,
        }
    }

    /// Returns `true` if every traversal starts from the beginning.
    pub const fn is_restartable(&self) -> bool {
        matches!(self.capability(), Capability::Restartable)
    }

    /// Starts a traversal.
    ///
    /// For a single-pass sequence the returned iterator shares state with
    /// every other traversal.
    ///
    /// # Panics
    ///
    /// Pulling from a single-pass sequence while a pull from the same
    /// sequence is already in progress (a sequence that feeds itself)
    /// panics.
    pub fn iter(&self) -> Values {
        match &self.source {
            Source::Factory { factory, .. } => factory(),
            Source::Shared(shared) => Values::new(SharedCursor(Rc::clone(shared))),
        }
    }

    /// Converts an iterable [`Value`] into a sequence, naming `operator` in
    /// the error when the value is not iterable.
    ///
    /// Arrays and text become restartable sequences sharing the same
    /// storage; a sequence value is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`OperatorError::NotIterable`] for any other value.
    pub fn from_value(value: &Value, operator: &str) -> Result<Self, OperatorError> {
        match value {
            Value::Sequence(sequence) => Ok(sequence.clone()),
            Value::Array(values) => Ok(Self::from_values(Rc::clone(values))),
            Value::Text(text) => {
                let text = Rc::clone(text);
                Ok(Self::restartable(move || Values::from_text(Rc::clone(&text))))
            }
            other => Err(OperatorError::NotIterable {
                operator: operator.to_string(),
                found: other.type_name(),
            }),
        }
    }

    /// Collects the remaining elements of one traversal.
    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().collect()
    }
}

impl TryFrom<Value> for Sequence {
    type Error = OperatorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value, "Sequence::try_from")
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iterable: I) -> Self {
        Self::from_values(iterable.into_iter().collect::<Vec<_>>())
    }
}

impl IntoIterator for &Sequence {
    type Item = Value;
    type IntoIter = Values;

    fn into_iter(self) -> Values {
        self.iter()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        match (&self.source, &other.source) {
            (Source::Factory { factory: left, .. }, Source::Factory { factory: right, .. }) => {
                std::ptr::addr_eq(Rc::as_ptr(left), Rc::as_ptr(right))
            }
            (Source::Shared(left), Source::Shared(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Sequence")
            .field("capability", &self.capability())
            .finish_non_exhaustive()
    }
}
