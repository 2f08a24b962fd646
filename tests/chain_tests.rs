#![cfg(feature = "chain")]
//! Integration tests for `Builder` and `Chainable`.
//!
//! Tests cover:
//! - Chain identity across transform calls
//! - Reducers ending a chain
//! - Custom builders and their isolation from the standard one
//! - Diagnostics emitted while a builder is assembled

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use lazychain::chain::{Builder, Chainable, Invoked, Tables, chainable, custom_builder};
use lazychain::error::{OperatorError, OperatorKind};
use lazychain::operator::{self, OperatorTable};
use lazychain::value;
use lazychain::value::{Function, Sequence, Value};
use rstest::{fixture, rstest};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn builder() -> Builder {
    chainable()
}

fn number(value: &Value) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

fn add() -> Function {
    Function::binary(|accumulator, item| Value::from(number(accumulator) + number(item)))
}

// =============================================================================
// Identity and fluency
// =============================================================================

#[rstest]
fn transforms_return_the_same_chain(builder: Builder) {
    let mut chain = builder.chain_value(&value!([1, 2])).unwrap();
    let expected: *const Chainable = &chain;
    let identity = Function::unary(Value::clone);

    let after_map = chain.map(identity).unwrap();
    assert!(std::ptr::eq(after_map, expected));
    let after_take = after_map.take(1).unwrap();
    assert!(std::ptr::eq(after_take, expected));
}

#[rstest]
fn generic_and_named_dispatch_agree(builder: Builder) {
    let mut named = builder.range([10]).unwrap();
    named.filter(Function::unary(|x| Value::from(number(x) > 6.0))).unwrap();

    let mut generic = builder.generate("range", &[Value::from(10)]).unwrap();
    let predicate = Function::unary(|x| Value::from(number(x) > 6.0));
    generic.apply("filter", &[predicate.into()]).unwrap();

    assert_eq!(named.to_array(), generic.finish("toArray", &[]));
    assert_eq!(named.to_array(), Ok(value!([7, 8, 9])));
}

#[rstest]
fn reduce_sums_a_range(builder: Builder) {
    assert_eq!(builder.range([10]).unwrap().reduce(add(), 0), Ok(Value::from(45)));
    assert_eq!(
        builder.range([10]).unwrap().to_array(),
        Ok(value!([0, 1, 2, 3, 4, 5, 6, 7, 8, 9]))
    );
}

#[rstest]
fn tap_observes_without_changing(builder: Builder) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let record = Function::unary(move |x| {
        sink.borrow_mut().push(number(x) * 2.0);
        Value::Undefined
    });

    let output = builder.range([3]).unwrap().tap(record).unwrap().to_array();
    assert_eq!(output, Ok(value!([0, 1, 2])));
    assert_eq!(*log.borrow(), vec![0.0, 2.0, 4.0]);
}

#[rstest]
fn for_each_returns_undefined(builder: Builder) {
    let seen = Rc::new(RefCell::new(0.0));
    let total = Rc::clone(&seen);
    let accumulate = Function::unary(move |x| {
        *total.borrow_mut() += number(x);
        Value::Undefined
    });
    let chain = builder.repeat(4, 2.5).unwrap();
    assert_eq!(chain.for_each(accumulate), Ok(Value::Undefined));
    assert!((*seen.borrow() - 10.0).abs() < f64::EPSILON);
}

#[rstest]
fn chains_are_iterable(builder: Builder) {
    let mut chain = builder.concatenate([value!([1]), value!([]), value!([2, 3])]).unwrap();
    chain.chunk(2).unwrap();
    let mut groups = Vec::new();
    for group in &chain {
        groups.push(group);
    }
    assert_eq!(groups, vec![value!([1, 2]), value!([3])]);
}

#[rstest]
fn chains_can_feed_generators(builder: Builder) {
    let letters = builder.from("abc").unwrap();
    let numbers = builder.range([3]).unwrap();
    let zipped = builder.zip_all([Value::from(letters), Value::from(numbers), value!([true])]);
    assert_eq!(
        zipped.unwrap().to_array(),
        Ok(value!([["a", 0, true], ["b", 1, ()], ["c", 2, ()]]))
    );
}

#[rstest]
fn invoke_reports_which_way_the_chain_went(builder: Builder) {
    let mut chain = builder.range([4]).unwrap();
    match chain.invoke("take", &[Value::from(2)]).unwrap() {
        Invoked::Chain(same) => assert_eq!(same.iter().count(), 2),
        Invoked::Value(value) => panic!("take returned a value: {value}"),
    }
    let array = chain.invoke("toArray", &[]).unwrap();
    assert_eq!(array.into_value(), Some(value!([0, 1])));
}

#[rstest]
fn unknown_names_are_errors(builder: Builder) {
    assert_eq!(
        builder.generate("shuffle", &[]).unwrap_err(),
        OperatorError::unknown(OperatorKind::Generator, "shuffle")
    );
    let mut chain = builder.range([1]).unwrap();
    assert_eq!(
        chain.invoke("shuffle", &[]).unwrap_err().to_string(),
        "no method named `shuffle` is registered"
    );
}

// =============================================================================
// Custom builders
// =============================================================================

#[rstest]
fn custom_builders_replace_operators_by_name() {
    let standard = Tables::standard();
    let loud_map = operator::transform(|arguments, input| {
        let upper = Function::unary(|x| Value::from(x.to_string().to_uppercase()));
        let mapped = operator::map(arguments, input)?;
        operator::map(&[upper.into()], mapped)
    });
    let custom = custom_builder(
        standard.generators.clone(),
        standard.transforms.clone().with("map", loud_map),
        standard.reducers.clone(),
    );

    let twice = Function::unary(|x| Value::from(format!("{x}{x}")));
    let custom_output = custom.from(value!(["a", "b"])).unwrap().map(twice.clone()).unwrap().to_array();
    assert_eq!(custom_output, Ok(value!(["AA", "BB"])));

    let standard_output = chainable().from(value!(["a", "b"])).unwrap().map(twice).unwrap().to_array();
    assert_eq!(standard_output, Ok(value!(["aa", "bb"])));
}

#[rstest]
fn reduced_tables_expose_exactly_their_names() {
    let standard = Tables::standard();
    let custom = custom_builder(
        standard.generators.select(&["range"]),
        standard.transforms.select(&["map", "filter"]),
        standard.reducers.select(&["toArray"]),
    );
    assert_eq!(custom.generator_names().collect::<Vec<_>>(), vec!["range"]);
    assert_eq!(custom.method_names().collect::<Vec<_>>(), vec!["map", "filter", "toArray"]);

    let mut chain = custom.range([3]).unwrap();
    assert!(chain.take(1).is_err());
    assert!(custom.repeat(1, 1).is_err());
    assert_eq!(chain.to_array(), Ok(value!([0, 1, 2])));
}

#[rstest]
fn builders_accept_caller_sequences() {
    let custom = Builder::new(OperatorTable::new(), OperatorTable::new(), Tables::standard().reducers);
    let sequence = Sequence::restartable(|| (1..=3).map(Value::from));
    let chain = custom.chain(sequence);
    assert_eq!(chain.to_array(), Ok(value!([1, 2, 3])));
    assert_eq!(chain.to_array(), Ok(value!([1, 2, 3])));
}

// =============================================================================
// Diagnostics
// =============================================================================

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buffer);
        Ok(buffer.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[rstest]
fn assembling_a_builder_logs_its_surface_and_collisions() {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("lazychain=debug"))
        .with_writer(log.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let transforms = OperatorTable::new().with("count", operator::transform(|_, input| Ok(input)));
        let reducers = OperatorTable::new().with(
            "count",
            operator::reducer(|_, input| Ok(Value::from(input.iter().count()))),
        );
        let builder = custom_builder(OperatorTable::new(), transforms, reducers);
        assert!(builder.generate("range", &[]).is_err());
    });

    let output = log.contents();
    assert!(output.contains("assembled chainable builder"));
    assert!(output.contains("reducer replaces a transform of the same name"));
    assert!(output.contains("unknown generator"));
}
