//! The ordered operator registry.

use std::fmt;

/// An ordered mapping from operator name to operator.
///
/// Names keep their registration order, which is the order reported by
/// [`OperatorTable::names`]. Registering a name that already exists replaces
/// the operator in place, so the last registration wins without changing
/// the order.
///
/// Tables are plain values: cloning one clones the list and shares the
/// operators, and changes to the clone never reach the original.
///
/// # Examples
///
/// ```rust
/// use lazychain::operator::{OperatorTable, standard_transforms};
///
/// let standard = standard_transforms();
/// let trimmed: OperatorTable<_> = standard.select(&["map", "take"]);
/// assert_eq!(trimmed.names().collect::<Vec<_>>(), vec!["map", "take"]);
/// assert!(standard.contains("filter"));
/// ```
#[derive(Clone)]
pub struct OperatorTable<Op> {
    entries: Vec<(String, Op)>,
}

impl<Op> OperatorTable<Op> {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers `operator` under `name`, returning the table.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, operator: Op) -> Self {
        self.insert(name, operator);
        self
    }

    /// Registers `operator` under `name`, returning the operator it
    /// replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, operator: Op) -> Option<Op> {
        let name = name.into();
        if let Some(position) = self.position(&name) {
            tracing::trace!(operator = %name, "replacing operator table entry");
            return Some(std::mem::replace(&mut self.entries[position].1, operator));
        }
        self.entries.push((name, operator));
        None
    }

    /// Removes `name`, returning the table.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.remove(name);
        self
    }

    /// Removes and returns the operator registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Op> {
        let position = self.position(name)?;
        Some(self.entries.remove(position).1)
    }

    /// Looks up an operator.
    pub fn get(&self, name: &str) -> Option<&Op> {
        self.position(name).map(|position| &self.entries[position].1)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Operator names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, operator)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Op)> {
        self.entries.iter().map(|(name, operator)| (name.as_str(), operator))
    }

    /// The number of registered operators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| entry == name)
    }
}

impl<Op: Clone> OperatorTable<Op> {
    /// A new table holding only the listed operators, in the listed order.
    /// Names that are not registered are skipped.
    #[must_use]
    pub fn select(&self, names: &[&str]) -> Self {
        names
            .iter()
            .filter_map(|name| self.get(name).map(|operator| (*name, operator.clone())))
            .collect()
    }

    /// A new table holding this table's entries followed by `other`'s, with
    /// `other` winning on shared names.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (name, operator) in other.iter() {
            merged.insert(name, operator.clone());
        }
        merged
    }
}

impl<Op> Default for OperatorTable<Op> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Op, K: Into<String>> FromIterator<(K, Op)> for OperatorTable<Op> {
    fn from_iter<I: IntoIterator<Item = (K, Op)>>(entries: I) -> Self {
        let mut table = Self::new();
        for (name, operator) in entries {
            table.insert(name, operator);
        }
        table
    }
}

impl<Op> fmt::Debug for OperatorTable<Op> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.names()).finish()
    }
}
