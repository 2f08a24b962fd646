//! Typed lazy adapters that the standard library does not provide.
//!
//! `map`, `filter`, `take`, `take_while` and `inspect` already exist on
//! [`Iterator`]; the adapters here fill in grouping, pairwise differencing
//! and decision-driven flattening.

use std::iter::Fuse;

// =============================================================================
// Chunk
// =============================================================================

/// Groups consecutive elements into vectors of `size`.
///
/// The final group may be shorter; an empty input produces no groups. A
/// `size` of zero never fills a group, so everything lands in one final
/// group.
#[derive(Debug, Clone)]
pub struct Chunk<I> {
    iterator: Fuse<I>,
    size: usize,
}

impl<I: Iterator> Chunk<I> {
    /// Wraps `iterator`.
    pub fn new(iterator: I, size: usize) -> Self {
        Self {
            iterator: iterator.fuse(),
            size,
        }
    }
}

impl<I: Iterator> Iterator for Chunk<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut group = Vec::new();
        for item in self.iterator.by_ref() {
            group.push(item);
            if group.len() == self.size {
                return Some(group);
            }
        }
        if group.is_empty() { None } else { Some(group) }
    }
}

// =============================================================================
// Diff
// =============================================================================

/// Applies a function to every adjacent `(previous, current)` pair.
///
/// Inputs with fewer than two elements produce nothing.
pub struct Diff<I: Iterator, F> {
    iterator: Fuse<I>,
    previous: Option<I::Item>,
    function: F,
}

impl<I: Iterator, F> Diff<I, F> {
    /// Wraps `iterator`.
    pub fn new(iterator: I, function: F) -> Self {
        Self {
            iterator: iterator.fuse(),
            previous: None,
            function,
        }
    }
}

impl<I, F, U> Iterator for Diff<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &I::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        let previous = match self.previous.take() {
            Some(previous) => previous,
            None => self.iterator.next()?,
        };
        let current = self.iterator.next()?;
        let output = (self.function)(&previous, &current);
        self.previous = Some(current);
        Some(output)
    }
}

// =============================================================================
// FlattenPerFunction
// =============================================================================

/// What [`FlattenPerFunction`] should do with one input element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<T, J> {
    /// Splice the elements of the contained iterable into the output.
    Iterate(J),
    /// Emit the contained item as a single element.
    Yield(T),
}

/// Flattens by asking a decision function about every element.
///
/// One-level and recursive flattening are both special cases: recursion is
/// expressed by returning a decision whose iterable is itself a
/// `FlattenPerFunction`.
pub struct FlattenPerFunction<I, F, J: IntoIterator> {
    iterator: I,
    decide: F,
    current: Option<J::IntoIter>,
}

impl<I, F, J: IntoIterator> FlattenPerFunction<I, F, J> {
    /// Wraps `iterator`.
    pub const fn new(iterator: I, decide: F) -> Self {
        Self {
            iterator,
            decide,
            current: None,
        }
    }
}

impl<I, F, J, U> Iterator for FlattenPerFunction<I, F, J>
where
    I: Iterator,
    F: FnMut(I::Item) -> Decision<U, J>,
    J: IntoIterator<Item = U>,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        loop {
            if let Some(inner) = self.current.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                self.current = None;
            }
            match (self.decide)(self.iterator.next()?) {
                Decision::Yield(item) => return Some(item),
                Decision::Iterate(iterable) => self.current = Some(iterable.into_iter()),
            }
        }
    }
}

// =============================================================================
// Extension trait
// =============================================================================

/// Adds the adapters of this module to every [`Iterator`].
///
/// # Examples
///
/// ```rust
/// use lazychain::iter::{Decision, SequenceExt};
///
/// let groups: Vec<Vec<i32>> = (0..5).chunk(2).collect();
/// assert_eq!(groups, vec![vec![0, 1], vec![2, 3], vec![4]]);
///
/// let steps: Vec<i32> = [1, 4, 9, 16].into_iter().diff(|a, b| b - a).collect();
/// assert_eq!(steps, vec![3, 5, 7]);
///
/// let flat: Vec<i32> = vec![vec![1, 2], vec![3]]
///     .into_iter()
///     .flatten_per_function(|group| Decision::<i32, _>::Iterate(group))
///     .collect();
/// assert_eq!(flat, vec![1, 2, 3]);
/// ```
pub trait SequenceExt: Iterator + Sized {
    /// See [`Chunk`].
    fn chunk(self, size: usize) -> Chunk<Self> {
        Chunk::new(self, size)
    }

    /// See [`Diff`].
    fn diff<F, U>(self, function: F) -> Diff<Self, F>
    where
        F: FnMut(&Self::Item, &Self::Item) -> U,
    {
        Diff::new(self, function)
    }

    /// See [`FlattenPerFunction`].
    fn flatten_per_function<F, U, J>(self, decide: F) -> FlattenPerFunction<Self, F, J>
    where
        F: FnMut(Self::Item) -> Decision<U, J>,
        J: IntoIterator<Item = U>,
    {
        FlattenPerFunction::new(self, decide)
    }

    /// Hands the whole iterator to `function`, which may wrap it in any
    /// custom lazy adapter, without breaking a method chain.
    fn map_with<F, R>(self, function: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        function(self)
    }
}

impl<I: Iterator> SequenceExt for I {}
