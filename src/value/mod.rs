//! Dynamically typed values flowing through operator tables.
//!
//! Operator tables map names to operators with arbitrary argument lists, so
//! the values they exchange are dynamically typed. [`Value`] covers scalars,
//! text, arrays, string-keyed objects, lazy [`Sequence`]s and callable
//! [`Function`]s.
//!
//! [`Value::Undefined`] is the absent-value sentinel: it stands in for
//! missing zip slots, missing object fields and out-of-range indices, and it
//! is what `None` converts into.
//!
//! # Examples
//!
//! ```rust
//! use lazychain::value;
//! use lazychain::value::Value;
//!
//! let nested = value!([0, [1, 2], "three"]);
//! assert_eq!(nested.length(), Some(3));
//! assert_eq!(nested.at(1.0).at(0.0), Value::from(1));
//! assert_eq!(nested.at(7.0), Value::Undefined);
//! ```

mod sequence;
#[cfg(feature = "serde")]
mod serde_support;

pub use sequence::{Capability, Sequence, Values};

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// A dynamically typed value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The absent-value sentinel.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// Immutable text. Iterable, but never flattened.
    Text(Rc<str>),
    /// An immutable, shared array.
    Array(Rc<[Value]>),
    /// An immutable, shared string-keyed object. Keys keep insertion order.
    Object(Rc<IndexMap<String, Value>>),
    /// A lazy sequence.
    Sequence(Sequence),
    /// A callable.
    Function(Function),
}

impl Value {
    /// Builds an array value.
    pub fn array<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::Array(values.into_iter().map(Into::into).collect())
    }

    /// Builds an object value from `(name, value)` pairs. Keys keep the
    /// order they first appear in; later duplicates overwrite the value.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Object(Rc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Builds the decision record understood by `flattenPerFunction`:
    /// an object with an `iterate` flag and an `itemToYield`.
    pub fn decision(iterate: bool, item_to_yield: impl Into<Self>) -> Self {
        Self::object([
            ("iterate", Self::Bool(iterate)),
            ("itemToYield", item_to_yield.into()),
        ])
    }

    /// A short lowercase name for the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Sequence(_) => "sequence",
            Self::Function(_) => "function",
        }
    }

    /// Returns `true` for [`Value::Undefined`].
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` only for `Bool(true)`.
    ///
    /// Predicates in `filter`, `reject` and `takeWhile` use this strict test,
    /// so a predicate returning `1` or `"yes"` does not count as passing.
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Loose truthiness: `undefined`, `null`, `false`, `0`, `NaN` and the
    /// empty string are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Text(text) => !text.is_empty(),
            _ => true,
        }
    }

    /// The numeric payload, if any.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// The boolean payload, if any.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The text payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(&**text),
            _ => None,
        }
    }

    /// The array payload, if any.
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(values) => Some(&**values),
            _ => None,
        }
    }

    /// The object payload, if any.
    pub fn as_object(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Object(entries) => Some(&**entries),
            _ => None,
        }
    }

    /// The sequence payload, if any.
    pub const fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// The function payload, if any.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// The element count of arrays and the character count of text.
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Array(values) => Some(values.len()),
            Self::Text(text) => Some(text.chars().count()),
            _ => None,
        }
    }

    /// Positional access into arrays and text.
    ///
    /// Positions that are negative, fractional or past the end yield
    /// [`Value::Undefined`], as does indexing anything else.
    pub fn at(&self, position: f64) -> Self {
        if position < 0.0 || position.fract() != 0.0 {
            return Self::Undefined;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let position = position as usize;
        match self {
            Self::Array(values) => values.get(position).cloned().unwrap_or_default(),
            Self::Text(text) => text
                .chars()
                .nth(position)
                .map_or(Self::Undefined, |character| Self::from(character.to_string())),
            _ => Self::Undefined,
        }
    }

    /// Named access into objects.
    ///
    /// Arrays and text answer `length` and decimal positions. Missing names
    /// and non-object receivers yield [`Value::Undefined`].
    pub fn get(&self, name: &str) -> Self {
        match self {
            Self::Object(entries) => entries.get(name).cloned().unwrap_or_default(),
            Self::Array(_) | Self::Text(_) => {
                if name == "length" {
                    return self
                        .length()
                        .map_or(Self::Undefined, |length| Self::Number(usize_to_f64(length)));
                }
                name.parse::<usize>()
                    .map_or(Self::Undefined, |position| self.at(usize_to_f64(position)))
            }
            _ => Self::Undefined,
        }
    }

    /// Returns `true` for arrays, text and sequences.
    pub const fn is_iterable(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Text(_) | Self::Sequence(_))
    }

    /// Iterates arrays, text (one single-character text per character) and
    /// sequences. Returns `None` for everything else.
    pub fn iter(&self) -> Option<Values> {
        match self {
            Self::Array(values) => Some(Values::from_array(Rc::clone(values))),
            Self::Text(text) => Some(Values::from_text(Rc::clone(text))),
            Self::Sequence(sequence) => Some(sequence.iter()),
            _ => None,
        }
    }

    /// Renders the value as an object property name.
    pub fn to_key(&self) -> String {
        match self {
            Self::Text(text) => text.to_string(),
            other => other.to_string(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) const fn usize_to_f64(number: usize) -> f64 {
    number as f64
}

fn write_number(formatter: &mut fmt::Formatter<'_>, number: f64) -> fmt::Result {
    if number.is_infinite() {
        formatter.write_str(if number > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(formatter, "{number}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => formatter.write_str("undefined"),
            Self::Null => formatter.write_str("null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Number(number) => write_number(formatter, *number),
            Self::Text(text) => formatter.write_str(text),
            Self::Array(values) => {
                formatter.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{value}")?;
                }
                formatter.write_str("]")
            }
            Self::Object(entries) => {
                formatter.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}: {value}")?;
                }
                formatter.write_str("}")
            }
            Self::Sequence(_) => formatter.write_str("[sequence]"),
            Self::Function(_) => formatter.write_str("[function]"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<f32> for Value {
    fn from(number: f32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(number: i64) -> Self {
        Self::Number(number as f64)
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Self::Number(usize_to_f64(number))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(Rc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(Rc::from(text))
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Undefined
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Undefined, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::array(values)
    }
}

impl From<IndexMap<String, Self>> for Value {
    fn from(entries: IndexMap<String, Self>) -> Self {
        Self::Object(Rc::new(entries))
    }
}

impl From<Sequence> for Value {
    fn from(sequence: Sequence) -> Self {
        Self::Sequence(sequence)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

// =============================================================================
// Function
// =============================================================================

type Callable = dyn Fn(&[Value]) -> Value;

/// A shared, dynamically typed callable.
///
/// Functions receive their arguments as a slice. Missing arguments read as
/// [`Value::Undefined`] through [`Function::unary`] and [`Function::binary`],
/// and extra arguments are ignored. Two `Function`s are equal only if they
/// share the same closure.
///
/// # Examples
///
/// ```rust
/// use lazychain::value::{Function, Value};
///
/// let double = Function::unary(|x| Value::from(x.as_f64().unwrap_or(0.0) * 2.0));
/// assert_eq!(double.call(&[Value::from(4)]), Value::from(8));
/// ```
#[derive(Clone)]
pub struct Function(Rc<Callable>);

impl Function {
    /// Wraps a closure that takes the raw argument slice.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self(Rc::new(function))
    }

    /// Wraps a one-argument closure.
    pub fn unary<F>(function: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Self::new(move |arguments| match arguments {
            [first, ..] => function(first),
            [] => function(&Value::Undefined),
        })
    }

    /// Wraps a two-argument closure.
    pub fn binary<F>(function: F) -> Self
    where
        F: Fn(&Value, &Value) -> Value + 'static,
    {
        Self::new(move |arguments| match arguments {
            [first, second, ..] => function(first, second),
            [first] => function(first, &Value::Undefined),
            [] => function(&Value::Undefined, &Value::Undefined),
        })
    }

    /// Invokes the function.
    #[inline]
    pub fn call(&self, arguments: &[Value]) -> Value {
        (self.0)(arguments)
    }

    /// Invokes the function with a single argument.
    #[inline]
    pub fn call1(&self, argument: &Value) -> Value {
        (self.0)(std::slice::from_ref(argument))
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Function(..)")
    }
}

// =============================================================================
// Literal macro
// =============================================================================

/// Builds a [`Value`] from a literal, nesting bracketed lists as arrays.
///
/// Anything that is not a bracketed list goes through [`Value::from`].
///
/// ```rust
/// use lazychain::value;
/// use lazychain::value::Value;
///
/// let tree = value!([0, [1, [2, [3]]], "leaf", -4]);
/// assert_eq!(tree.length(), Some(4));
/// assert_eq!(tree.at(3.0), Value::from(-4));
/// assert_eq!(value!([]), Value::array(Vec::<Value>::new()));
/// ```
#[macro_export]
macro_rules! value {
    ([ $($elements:tt)* ]) => {
        $crate::value::Value::array($crate::__value_elements!(@accumulate [] $($elements)*))
    };
    ($other:expr) => {
        $crate::value::Value::from($other)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __value_elements {
    (@accumulate [$($done:expr,)*]) => {{
        let elements: ::std::vec::Vec<$crate::value::Value> = ::std::vec![$($done,)*];
        elements
    }};
    (@accumulate [$($done:expr,)*] [ $($inner:tt)* ] $(, $($rest:tt)*)?) => {
        $crate::__value_elements!(
            @accumulate [$($done,)* $crate::value!([ $($inner)* ]),] $($($rest)*)?
        )
    };
    (@accumulate [$($done:expr,)*] $element:expr $(, $($rest:tt)*)?) => {
        $crate::__value_elements!(
            @accumulate [$($done,)* $crate::value!($element),] $($($rest)*)?
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Undefined, false)]
    #[case(Value::Null, false)]
    #[case(Value::from(0), false)]
    #[case(Value::Number(f64::NAN), false)]
    #[case(Value::from(""), false)]
    #[case(Value::from(false), false)]
    #[case(Value::from(2), true)]
    #[case(Value::from("x"), true)]
    #[case(value!([]), true)]
    fn truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    fn strict_truth_only_accepts_bool_true() {
        assert!(Value::from(true).is_true());
        assert!(!Value::from(1).is_true());
        assert!(!Value::from("true").is_true());
    }

    #[rstest]
    fn get_reads_fields_and_array_properties() {
        let person = Value::object([("name", "Betty")]);
        assert_eq!(person.get("name"), Value::from("Betty"));
        assert_eq!(person.get("age"), Value::Undefined);
        let row = value!(["a", "b"]);
        assert_eq!(row.get("length"), Value::from(2));
        assert_eq!(row.get("1"), Value::from("b"));
        assert_eq!(Value::from(3).get("name"), Value::Undefined);
    }

    #[rstest]
    fn duplicate_keys_keep_their_first_position() {
        let object = Value::object([("b", 1), ("a", 2), ("b", 3)]);
        let keys: Vec<&str> = object.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(object.get("b"), Value::from(3));
    }

    #[rstest]
    fn at_handles_text_by_character() {
        let word = Value::from("héllo");
        assert_eq!(word.length(), Some(5));
        assert_eq!(word.at(1.0), Value::from("é"));
        assert_eq!(word.at(-1.0), Value::Undefined);
        assert_eq!(word.at(0.5), Value::Undefined);
    }

    #[rstest]
    fn option_none_converts_to_the_sentinel() {
        assert_eq!(Value::from(None::<i32>), Value::Undefined);
        assert_eq!(Value::from(Some(3)), Value::from(3));
    }

    #[rstest]
    fn macro_nests_arrays() {
        let nested = value!([1, [2, 3], []]);
        let expected = Value::array([
            Value::from(1),
            Value::array([2, 3]),
            Value::array(Vec::<Value>::new()),
        ]);
        assert_eq!(nested, expected);
    }

    #[rstest]
    #[case(value!([1, "a", [true]]), "[1, a, [true]]")]
    #[case(Value::Number(f64::INFINITY), "Infinity")]
    #[case(Value::from(2.5), "2.5")]
    #[case(Value::object([("k", 1)]), "{k: 1}")]
    #[case(Value::object([("zeta", 1), ("alpha", 2)]), "{zeta: 1, alpha: 2}")]
    fn display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn functions_compare_by_identity() {
        let first = Function::unary(Clone::clone);
        let second = Function::unary(Clone::clone);
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[rstest]
    fn binary_fills_missing_arguments_with_undefined() {
        let pair = Function::binary(|a, b| Value::array([a.clone(), b.clone()]));
        assert_eq!(pair.call(&[Value::from(1)]), value!([1, ()]));
    }

    #[rstest]
    fn iterating_text_yields_characters() {
        let letters: Vec<Value> = Value::from("ab").iter().into_iter().flatten().collect();
        assert_eq!(letters, vec![Value::from("a"), Value::from("b")]);
        assert!(Value::from(1).iter().is_none());
    }
}
