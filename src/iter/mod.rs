//! Statically typed lazy sequences.
//!
//! This module is the typed foundation that the dynamic operator tables are
//! built on. Everything here is an ordinary [`Iterator`], so it composes with
//! the standard adapters and fuses into a single pass:
//!
//! - Generators: [`range`], [`range_from`], [`range_step`],
//!   [`range_unbounded`], [`repeat`], [`repeat_iterable`], [`concatenate`],
//!   [`zip`], [`zip_all`]
//! - Adapters: [`Chunk`], [`Diff`], [`FlattenPerFunction`], reachable through
//!   [`SequenceExt`]
//! - Capabilities: an [`Iterator`] is single-pass, a [`Restartable`] source
//!   produces a fresh iterator on demand ([`Factory`], [`Replay`])
//!
//! # Examples
//!
//! ```rust
//! use lazychain::iter::{SequenceExt, range_unbounded};
//!
//! // Nothing is materialized until `collect`, and the unbounded range is
//! // only pulled six times.
//! let pairs: Vec<Vec<u32>> = range_unbounded(0, 1)
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * 10)
//!     .take(6)
//!     .chunk(2)
//!     .collect();
//! assert_eq!(pairs, vec![vec![0, 20], vec![40, 60], vec![80, 100]]);
//! ```

mod adapters;
mod generators;
mod restartable;

pub use adapters::{Chunk, Decision, Diff, FlattenPerFunction, SequenceExt};
pub use generators::{
    Range, RepeatIterable, Zip, ZipAll, concatenate, range, range_from, range_step,
    range_unbounded, repeat, repeat_iterable, zip, zip_all,
};
pub use restartable::{Factory, Replay, Restartable};
