//! Named methods for the standard operators.
//!
//! Each method forwards to [`Builder::generate`], [`Chainable::apply`] or
//! [`Chainable::finish`] under the operator's table name, so it runs
//! whatever the chain's own tables register under that name. A custom
//! builder that omits an operator reports
//! [`OperatorError::UnknownOperator`](crate::error::OperatorError::UnknownOperator)
//! from the matching method.

use smallvec::{SmallVec, smallvec};

use super::{Builder, Chainable};
use crate::error::OperatorError;
use crate::value::Value;

type Positional = SmallVec<[Value; 2]>;

macro_rules! generator_method {
    ($method:ident, $name:ident, ($($argument:ident),*)) => {
        #[doc = concat!("Starts a chain with the `", stringify!($name), "` generator.")]
        ///
        /// # Errors
        ///
        /// Unknown generator or invalid arguments.
        pub fn $method(&self, $($argument: impl Into<Value>),*) -> Result<Chainable, OperatorError> {
            let arguments: Positional = smallvec![$($argument.into()),*];
            self.generate(stringify!($name), &arguments)
        }
    };
    ($method:ident, $name:ident, [$argument:ident]) => {
        #[doc = concat!("Starts a chain with the `", stringify!($name), "` generator.")]
        ///
        /// # Errors
        ///
        /// Unknown generator or invalid arguments.
        pub fn $method<I>(&self, $argument: I) -> Result<Chainable, OperatorError>
        where
            I: IntoIterator,
            I::Item: Into<Value>,
        {
            let arguments: Positional = $argument.into_iter().map(Into::into).collect();
            self.generate(stringify!($name), &arguments)
        }
    };
}

macro_rules! generator_methods {
    ($($name:ident $arguments:tt;)*) => {
        paste::paste! {
            impl Builder {
                $(generator_method!([<$name:snake>], $name, $arguments);)*
            }
        }
    };
}

macro_rules! transform_methods {
    ($($name:ident($($argument:ident),*);)*) => {
        paste::paste! {
            impl Chainable {
                $(
                    #[doc = concat!("Applies the `", stringify!($name), "` transform.")]
                    ///
                    /// # Errors
                    ///
                    /// Unknown transform or invalid arguments.
                    pub fn [<$name:snake>](
                        &mut self,
                        $($argument: impl Into<Value>),*
                    ) -> Result<&mut Self, OperatorError> {
                        let arguments: Positional = smallvec![$($argument.into()),*];
                        self.apply(stringify!($name), &arguments)
                    }
                )*
            }
        }
    };
}

macro_rules! reducer_methods {
    ($($name:ident($($argument:ident),*);)*) => {
        paste::paste! {
            impl Chainable {
                $(
                    #[doc = concat!("Runs the `", stringify!($name), "` reducer.")]
                    ///
                    /// # Errors
                    ///
                    /// Unknown reducer or invalid arguments.
                    pub fn [<$name:snake>](
                        &self,
                        $($argument: impl Into<Value>),*
                    ) -> Result<Value, OperatorError> {
                        let arguments: Positional = smallvec![$($argument.into()),*];
                        self.finish(stringify!($name), &arguments)
                    }
                )*
            }
        }
    };
}

generator_methods! {
    concatenate [inputs];
    from (input);
    range [bounds];
    repeat (count, value);
    repeatIterable (count, input);
    zip [inputs];
    zipAll [inputs];
}

transform_methods! {
    arrayToObject(names);
    chunk(size);
    diff(function);
    filter(predicate);
    flatten();
    flattenPerFunction(decide);
    flattenRecursive();
    map(function);
    mapWith(function);
    nth(index);
    pluck(name);
    reject(predicate);
    take(count);
    takeWhile(predicate);
    tap(function);
}

reducer_methods! {
    forEach(function);
    reduce(function, initial);
    toArray();
}
