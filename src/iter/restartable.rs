//! The restartable capability.
//!
//! A plain [`Iterator`] is single-pass: once it has produced `None` it is
//! spent. A [`Restartable`] value can hand out a fresh iterator on every
//! call to [`Restartable::restart`], each one starting from the beginning.
//!
//! Operators that traverse their input more than once (such as
//! [`repeat_iterable`](super::repeat_iterable)) require this capability.
//!
//! # Examples
//!
//! ```rust
//! use lazychain::iter::{Factory, Restartable};
//!
//! let squares = Factory::new(|| (0..4).map(|x| x * x));
//! assert_eq!(squares.restart().collect::<Vec<_>>(), vec![0, 1, 4, 9]);
//! assert_eq!(squares.restart().collect::<Vec<_>>(), vec![0, 1, 4, 9]);
//! ```

use std::fmt;
use std::iter::Cloned;
use std::slice;

/// A source that produces a fresh iterator every time it is asked.
pub trait Restartable {
    /// The element type.
    type Item;
    /// The iterator type produced by each restart.
    type Iter: Iterator<Item = Self::Item>;

    /// Returns a new iterator positioned at the first element.
    fn restart(&self) -> Self::Iter;
}

impl<'a, T: Clone> Restartable for &'a [T] {
    type Item = T;
    type Iter = Cloned<slice::Iter<'a, T>>;

    fn restart(&self) -> Self::Iter {
        let slice: &'a [T] = *self;
        slice.iter().cloned()
    }
}

impl<T: Clone> Restartable for Vec<T> {
    type Item = T;
    type Iter = std::vec::IntoIter<T>;

    fn restart(&self) -> Self::Iter {
        self.clone().into_iter()
    }
}

/// A restartable source backed by an iterator-producing function.
///
/// This is the Rust counterpart of an iterable object whose iterator method
/// builds new generator state on every call.
#[derive(Clone)]
pub struct Factory<F> {
    function: F,
}

impl<F, I> Factory<F>
where
    F: Fn() -> I,
    I: Iterator,
{
    /// Wraps an iterator-producing function.
    #[inline]
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F, I> Restartable for Factory<F>
where
    F: Fn() -> I,
    I: Iterator,
{
    type Item = I::Item;
    type Iter = I;

    #[inline]
    fn restart(&self) -> I {
        (self.function)()
    }
}

impl<F> fmt::Debug for Factory<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Factory(<function>)")
    }
}

/// A restartable source that keeps a pristine copy of a cloneable iterator.
///
/// Each restart clones the stored iterator, so iteration never disturbs the
/// original.
///
/// # Examples
///
/// ```rust
/// use lazychain::iter::{Replay, Restartable};
///
/// let replay = Replay::new("ab".chars());
/// assert_eq!(replay.restart().collect::<String>(), "ab");
/// assert_eq!(replay.restart().collect::<String>(), "ab");
/// ```
#[derive(Debug, Clone)]
pub struct Replay<I> {
    pristine: I,
}

impl<I: Iterator + Clone> Replay<I> {
    /// Stores `iterator` so that it can be replayed from the start.
    #[inline]
    pub const fn new(iterator: I) -> Self {
        Self { pristine: iterator }
    }
}

impl<I: Iterator + Clone> Restartable for Replay<I> {
    type Item = I::Item;
    type Iter = I;

    #[inline]
    fn restart(&self) -> I {
        self.pristine.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn slice_restarts_from_the_beginning() {
        let data = [1, 2, 3];
        let source: &[i32] = &data;
        let mut first = source.restart();
        assert_eq!(first.next(), Some(1));
        assert_eq!(source.restart().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[rstest]
    fn vec_restart_leaves_the_vector_intact() {
        let source = vec!["a", "b"];
        assert_eq!(source.restart().count(), 2);
        assert_eq!(source.restart().count(), 2);
        assert_eq!(source, vec!["a", "b"]);
    }

    #[rstest]
    fn factory_calls_function_once_per_restart() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let factory = Factory::new(|| {
            calls.set(calls.get() + 1);
            0..2
        });
        assert_eq!(calls.get(), 0);
        let _ = factory.restart();
        let _ = factory.restart();
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn replay_does_not_advance_the_pristine_iterator() {
        let replay = Replay::new(10..13);
        let mut running = replay.restart();
        running.next();
        running.next();
        assert_eq!(replay.restart().collect::<Vec<_>>(), vec![10, 11, 12]);
    }
}
