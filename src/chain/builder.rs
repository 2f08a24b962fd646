//! The builder: turns three operator tables into a chainable method surface.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::Chainable;
use crate::error::{OperatorError, OperatorKind};
use crate::operator::{
    Generator, OperatorTable, Reducer, Transform, standard_generators, standard_reducers,
    standard_transforms,
};
use crate::value::{Sequence, Value};

// =============================================================================
// Tables
// =============================================================================

/// The three operator tables a [`Builder`] is assembled from.
///
/// [`Tables::standard`] (also the [`Default`]) holds the standard operator
/// set, which is the usual starting point for a partially customized
/// builder:
///
/// ```rust
/// use lazychain::chain::{Builder, Tables};
///
/// let tables = Tables::standard();
/// let builder = Builder::new(
///     tables.generators.select(&["range"]),
///     tables.transforms.select(&["map", "take"]),
///     tables.reducers.select(&["toArray"]),
/// );
/// assert!(builder.has_method("take"));
/// assert!(!builder.has_method("filter"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Tables {
    /// Builder-level entry points.
    pub generators: OperatorTable<Generator>,
    /// Chainable methods that return the chain.
    pub transforms: OperatorTable<Transform>,
    /// Chainable methods that return a value.
    pub reducers: OperatorTable<Reducer>,
}

impl Tables {
    /// The standard generators, transforms and reducers.
    pub fn standard() -> Self {
        Self {
            generators: standard_generators(),
            transforms: standard_transforms(),
            reducers: standard_reducers(),
        }
    }

    /// Three empty tables.
    pub const fn empty() -> Self {
        Self {
            generators: OperatorTable::new(),
            transforms: OperatorTable::new(),
            reducers: OperatorTable::new(),
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// A chainable method: either keeps the chain going or ends it.
#[derive(Clone)]
pub(crate) enum Method {
    Transform(Transform),
    Reducer(Reducer),
}

struct Registry {
    tables: Tables,
    methods: FxHashMap<String, Method>,
    method_names: Vec<String>,
    generators: FxHashMap<String, Generator>,
}

impl Registry {
    fn new(tables: Tables) -> Self {
        let mut methods = FxHashMap::default();
        let mut method_names = Vec::with_capacity(tables.transforms.len() + tables.reducers.len());

        for (name, transform) in tables.transforms.iter() {
            methods.insert(name.to_string(), Method::Transform(Rc::clone(transform)));
            method_names.push(name.to_string());
        }
        for (name, reducer) in tables.reducers.iter() {
            let previous = methods.insert(name.to_string(), Method::Reducer(Rc::clone(reducer)));
            if previous.is_some() {
                tracing::warn!(method = name, "reducer replaces a transform of the same name");
            } else {
                method_names.push(name.to_string());
            }
        }

        let generators = tables
            .generators
            .iter()
            .map(|(name, generator)| (name.to_string(), Rc::clone(generator)))
            .collect();

        tracing::debug!(
            generators = tables.generators.len(),
            transforms = tables.transforms.len(),
            reducers = tables.reducers.len(),
            "assembled chainable builder"
        );

        Self {
            tables,
            methods,
            method_names,
            generators,
        }
    }
}

/// Produces [`Chainable`]s whose methods are the entries of its tables.
///
/// The method tables are registered once, when the builder is constructed;
/// every call afterwards is a single hash lookup. Transforms are registered
/// before reducers, so a reducer wins if both tables use the same name.
///
/// Cloning a builder is cheap and shares its tables. Builders constructed
/// separately never share anything, so customizing one leaves every other
/// builder, including the default one, untouched.
///
/// # Examples
///
/// ```rust
/// use lazychain::chain::Builder;
/// use lazychain::value::{Function, Value};
///
/// let builder = Builder::standard();
/// let squares = builder
///     .range([10])?
///     .map(Function::unary(|x| Value::from(x.as_f64().unwrap_or(0.0).powi(2))))?
///     .take(3)?
///     .to_array()?;
/// assert_eq!(squares, lazychain::value!([0, 1, 4]));
/// # Ok::<(), lazychain::error::OperatorError>(())
/// ```
#[derive(Clone)]
pub struct Builder {
    registry: Rc<Registry>,
}

impl Builder {
    /// Assembles a builder from three operator tables.
    pub fn new(
        generators: OperatorTable<Generator>,
        transforms: OperatorTable<Transform>,
        reducers: OperatorTable<Reducer>,
    ) -> Self {
        Self::from_tables(Tables {
            generators,
            transforms,
            reducers,
        })
    }

    /// Assembles a builder from a [`Tables`] bundle.
    pub fn from_tables(tables: Tables) -> Self {
        Self {
            registry: Rc::new(Registry::new(tables)),
        }
    }

    /// A builder over the standard operator set.
    pub fn standard() -> Self {
        Self::from_tables(Tables::standard())
    }

    /// Wraps a sequence in a new chain.
    pub fn chain(&self, sequence: Sequence) -> Chainable {
        Chainable::new(self.clone(), sequence)
    }

    /// Wraps any iterable value in a new chain.
    ///
    /// # Errors
    ///
    /// [`OperatorError::NotIterable`] if `value` is not iterable.
    pub fn chain_value(&self, value: &Value) -> Result<Chainable, OperatorError> {
        Sequence::from_value(value, "chain").map(|sequence| self.chain(sequence))
    }

    /// Starts a chain by invoking the generator registered as `name`.
    ///
    /// # Errors
    ///
    /// [`OperatorError::UnknownOperator`] if no generator has that name, or
    /// whatever the generator reports about its arguments.
    pub fn generate(&self, name: &str, arguments: &[Value]) -> Result<Chainable, OperatorError> {
        let Some(generator) = self.registry.generators.get(name) else {
            tracing::debug!(generator = name, "unknown generator");
            return Err(OperatorError::unknown(OperatorKind::Generator, name));
        };
        generator(arguments).map(|sequence| self.chain(sequence))
    }

    /// Every chainable method name: transforms first, then reducers, each in
    /// registration order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.registry.method_names.iter().map(String::as_str)
    }

    /// Every generator name, in registration order.
    pub fn generator_names(&self) -> impl Iterator<Item = &str> {
        self.registry.tables.generators.names()
    }

    /// Returns `true` if chains from this builder have a method `name`.
    pub fn has_method(&self, name: &str) -> bool {
        self.registry.methods.contains_key(name)
    }

    /// Returns `true` if this builder has a generator `name`.
    pub fn has_generator(&self, name: &str) -> bool {
        self.registry.generators.contains_key(name)
    }

    /// The tables this builder was assembled from.
    pub fn tables(&self) -> &Tables {
        &self.registry.tables
    }

    /// Returns `true` if both handles refer to the same assembled builder.
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }

    pub(crate) fn method(&self, name: &str) -> Option<&Method> {
        let method = self.registry.methods.get(name);
        if method.is_none() {
            tracing::debug!(method = name, "unknown method");
        }
        method
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Builder")
            .field("generators", &self.registry.tables.generators)
            .field("methods", &self.registry.method_names)
            .finish()
    }
}
