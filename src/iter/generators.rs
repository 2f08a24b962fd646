//! Typed sequence generators.
//!
//! Every generator here is lazy: constructing one does no work, and each
//! element is produced only when the consumer asks for it.

use std::iter::{Flatten, Fuse, RepeatN};

use super::restartable::Restartable;

// =============================================================================
// Range
// =============================================================================

/// An arithmetic progression of `length` elements (or an unbounded one).
///
/// Element `i` equals `start + increment * i`; each element is computed by
/// adding `increment` to the previous one, and the successor of the final
/// element is never computed.
///
/// # Examples
///
/// ```rust
/// use lazychain::iter::{range, range_from, range_step};
///
/// assert_eq!(range::<i32>(5).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
/// assert_eq!(range_from(2, 5).collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
/// assert_eq!(range_step(2, 5, 3).collect::<Vec<_>>(), vec![2, 5, 8, 11, 14]);
/// ```
#[derive(Debug, Clone)]
pub struct Range<T> {
    current: T,
    increment: T,
    remaining: Option<usize>,
}

impl<T> Range<T>
where
    T: Clone + std::ops::Add<Output = T>,
{
    /// Creates a progression. `None` for `length` means unbounded.
    #[inline]
    pub const fn new(start: T, length: Option<usize>, increment: T) -> Self {
        Self {
            current: start,
            increment,
            remaining: length,
        }
    }

    /// Returns `true` if the progression never ends.
    #[inline]
    pub const fn is_unbounded(&self) -> bool {
        self.remaining.is_none()
    }
}

impl<T> Iterator for Range<T>
where
    T: Clone + std::ops::Add<Output = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.remaining.as_mut() {
            Some(0) => return None,
            Some(remaining) => *remaining -= 1,
            None => {}
        }
        let value = self.current.clone();
        if self.remaining != Some(0) {
            self.current = value.clone() + self.increment.clone();
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining
            .map_or((usize::MAX, None), |remaining| (remaining, Some(remaining)))
    }
}

/// `[0, 1, ..., length - 1]`.
#[inline]
pub fn range<T>(length: usize) -> Range<T>
where
    T: Clone + std::ops::Add<Output = T> + From<u8>,
{
    Range::new(T::from(0), Some(length), T::from(1))
}

/// `[start, start + 1, ..., start + length - 1]`.
#[inline]
pub fn range_from<T>(start: T, length: usize) -> Range<T>
where
    T: Clone + std::ops::Add<Output = T> + From<u8>,
{
    Range::new(start, Some(length), T::from(1))
}

/// `length` elements starting at `start`, `increment` apart.
///
/// Zero and negative increments are allowed.
#[inline]
pub const fn range_step<T>(start: T, length: usize, increment: T) -> Range<T>
where
    T: Clone + std::ops::Add<Output = T>,
{
    Range::new(start, Some(length), increment)
}

/// An endless progression. Only a bounding consumer such as
/// [`Iterator::take`] makes this terminate.
///
/// ```rust
/// use lazychain::iter::range_unbounded;
///
/// let evens: Vec<u64> = range_unbounded(0, 2).take(4).collect();
/// assert_eq!(evens, vec![0, 2, 4, 6]);
/// ```
#[inline]
pub const fn range_unbounded<T>(start: T, increment: T) -> Range<T>
where
    T: Clone + std::ops::Add<Output = T>,
{
    Range::new(start, None, increment)
}

// =============================================================================
// Repetition and concatenation
// =============================================================================

/// Yields `value` exactly `count` times.
#[inline]
pub fn repeat<T: Clone>(count: usize, value: T) -> RepeatN<T> {
    std::iter::repeat_n(value, count)
}

/// Plays a restartable source `count` times in a row.
///
/// Every pass calls [`Restartable::restart`], so the source must really
/// start over. A source whose restart hands back an already spent iterator
/// contributes its elements once and nothing afterwards.
///
/// # Examples
///
/// ```rust
/// use lazychain::iter::{Factory, repeat_iterable};
///
/// let cycled: Vec<i32> = repeat_iterable(3, Factory::new(|| 0..2)).collect();
/// assert_eq!(cycled, vec![0, 1, 0, 1, 0, 1]);
/// ```
pub struct RepeatIterable<S: Restartable> {
    source: S,
    remaining: usize,
    current: Option<S::Iter>,
}

impl<S: Restartable> Iterator for RepeatIterable<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            if let Some(iterator) = self.current.as_mut() {
                if let Some(item) = iterator.next() {
                    return Some(item);
                }
                self.current = None;
            }
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            self.current = Some(self.source.restart());
        }
    }
}

/// See [`RepeatIterable`].
#[inline]
pub const fn repeat_iterable<S: Restartable>(count: usize, source: S) -> RepeatIterable<S> {
    RepeatIterable {
        source,
        remaining: count,
        current: None,
    }
}

/// Yields all elements of each iterable in turn. Empty iterables are skipped.
///
/// ```rust
/// use lazychain::iter::concatenate;
///
/// let joined: Vec<i32> = concatenate(vec![vec![0, 1, 2], vec![], vec![3, 4]]).collect();
/// assert_eq!(joined, vec![0, 1, 2, 3, 4]);
/// ```
#[inline]
pub fn concatenate<I>(iterables: I) -> Flatten<I::IntoIter>
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    iterables.into_iter().flatten()
}

// =============================================================================
// Zipping
// =============================================================================

/// Tuples of the `n`-th element of every input, stopping at the shortest.
///
/// Each step pulls one element from every input before checking for
/// exhaustion; elements pulled from the longer inputs on the final step are
/// discarded. Zero inputs produce nothing.
#[derive(Debug, Clone)]
pub struct Zip<I> {
    iterators: Vec<I>,
    finished: bool,
}

impl<I: Iterator> Iterator for Zip<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut tuple = Vec::with_capacity(self.iterators.len());
        let mut exhausted = false;
        for iterator in &mut self.iterators {
            match iterator.next() {
                Some(item) => tuple.push(item),
                None => exhausted = true,
            }
        }
        if exhausted {
            self.finished = true;
            return None;
        }
        Some(tuple)
    }
}

/// See [`Zip`].
///
/// ```rust
/// use lazychain::iter::zip;
///
/// let pairs: Vec<Vec<i32>> = zip(vec![vec![0, 1, 2].into_iter(), vec![5, 6].into_iter()]).collect();
/// assert_eq!(pairs, vec![vec![0, 5], vec![1, 6]]);
/// ```
pub fn zip<I>(iterables: impl IntoIterator<Item = I>) -> Zip<I::IntoIter>
where
    I: IntoIterator,
{
    let iterators: Vec<_> = iterables.into_iter().map(IntoIterator::into_iter).collect();
    let finished = iterators.is_empty();
    Zip {
        iterators,
        finished,
    }
}

/// Tuples of the `n`-th element of every input, running until the longest
/// input is exhausted. Exhausted inputs contribute `None`.
#[derive(Debug, Clone)]
pub struct ZipAll<I> {
    iterators: Vec<Fuse<I>>,
}

impl<I: Iterator> Iterator for ZipAll<I> {
    type Item = Vec<Option<I::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        let tuple: Vec<Option<I::Item>> = self.iterators.iter_mut().map(Iterator::next).collect();
        if tuple.iter().all(Option::is_none) {
            None
        } else {
            Some(tuple)
        }
    }
}

/// See [`ZipAll`].
///
/// ```rust
/// use lazychain::iter::zip_all;
///
/// let rows: Vec<_> = zip_all(vec![vec![0, 1].into_iter(), vec![7].into_iter()]).collect();
/// assert_eq!(rows, vec![vec![Some(0), Some(7)], vec![Some(1), None]]);
/// ```
pub fn zip_all<I>(iterables: impl IntoIterator<Item = I>) -> ZipAll<I::IntoIter>
where
    I: IntoIterator,
{
    ZipAll {
        iterators: iterables
            .into_iter()
            .map(|iterable| iterable.into_iter().fuse())
            .collect(),
    }
}
