#![cfg(feature = "chain")]
//! Integration tests for the standard operator tables.
//!
//! Tests cover:
//! - Restartability inherited through generators and transforms
//! - Laziness: how many upstream elements each operator pulls
//! - Single-pass traps (`repeatIterable`, traversing twice)
//! - Custom operators living next to the standard ones

use std::cell::Cell;
use std::rc::Rc;

use lazychain::error::OperatorError;
use lazychain::operator::{
    self, OperatorTable, Transform, standard_generators, standard_reducers, standard_transforms,
};
use lazychain::value;
use lazychain::value::{Capability, Function, Sequence, Value};
use rstest::rstest;

// =============================================================================
// Helpers
// =============================================================================

fn call_generator(name: &str, arguments: &[Value]) -> Result<Sequence, OperatorError> {
    let table = standard_generators();
    let generator = table.get(name).expect("standard generator");
    generator(arguments)
}

fn call_transform(name: &str, arguments: &[Value], input: Sequence) -> Result<Sequence, OperatorError> {
    let table = standard_transforms();
    let transform = table.get(name).expect("standard transform");
    transform(arguments, input)
}

fn to_array(input: Sequence) -> Value {
    let table = standard_reducers();
    let reducer = table.get("toArray").expect("standard reducer");
    reducer(&[], input).expect("toArray never fails")
}

/// An unbounded counter that records how many elements were pulled.
fn counted_naturals(pulled: &Rc<Cell<usize>>) -> Sequence {
    let pulled = Rc::clone(pulled);
    Sequence::restartable(move || {
        let pulled = Rc::clone(&pulled);
        (0u32..).map(move |n| {
            pulled.set(pulled.get() + 1);
            Value::from(n)
        })
    })
}

fn is_even() -> Value {
    Function::unary(|x| Value::from(x.as_f64().is_some_and(|n| n % 2.0 == 0.0))).into()
}

// =============================================================================
// Table contents
// =============================================================================

#[rstest]
#[case::generators(
    standard_generators().names().map(str::to_string).collect::<Vec<_>>(),
    vec!["concatenate", "from", "range", "repeat", "repeatIterable", "zip", "zipAll"],
)]
#[case::reducers(
    standard_reducers().names().map(str::to_string).collect::<Vec<_>>(),
    vec!["forEach", "reduce", "toArray"],
)]
fn standard_tables_hold_the_documented_names(#[case] names: Vec<String>, #[case] expected: Vec<&str>) {
    assert_eq!(names, expected);
}

#[rstest]
fn standard_tables_are_fresh_values() {
    let mut trimmed = standard_transforms();
    trimmed.remove("map");
    assert!(!trimmed.contains("map"));
    assert!(standard_transforms().contains("map"));
}

// =============================================================================
// Capability
// =============================================================================

#[rstest]
#[case::range("range", vec![Value::from(3)], Capability::Restartable)]
#[case::repeat("repeat", vec![Value::from(3), Value::from("x")], Capability::Restartable)]
#[case::zip_arrays("zip", vec![value!([1]), value!([2])], Capability::Restartable)]
#[case::concatenate_text("concatenate", vec![Value::from("ab"), value!([1])], Capability::Restartable)]
fn generators_report_their_capability(
    #[case] name: &str,
    #[case] arguments: Vec<Value>,
    #[case] expected: Capability,
) {
    assert_eq!(call_generator(name, &arguments).unwrap().capability(), expected);
}

#[rstest]
fn single_pass_inputs_make_single_pass_outputs() {
    let once = Value::from(Sequence::single_pass((0..3).map(Value::from)));
    let zipped = call_generator("zip", &[once, value!([1, 2, 3])]).unwrap();
    assert_eq!(zipped.capability(), Capability::SinglePass);

    let mapped = call_transform("flatten", &[], zipped).unwrap();
    assert_eq!(mapped.capability(), Capability::SinglePass);
}

#[rstest]
fn traversing_a_single_pass_chain_twice_yields_the_rest() {
    let once = Sequence::single_pass((0..4).map(Value::from));
    let firsts = call_transform("take", &[Value::from(2)], once).unwrap();
    assert_eq!(to_array(firsts.clone()), value!([0, 1]));
    assert_eq!(to_array(firsts.clone()), value!([2, 3]));
    assert_eq!(to_array(firsts), value!([]));
}

#[rstest]
fn repeat_iterable_documents_the_single_pass_trap() {
    let once = Value::from(Sequence::single_pass((0..2).map(Value::from)));
    let repeated = call_generator("repeatIterable", &[Value::from(3), once]).unwrap();
    assert_eq!(to_array(repeated), value!([0, 1]));

    let restartable = call_generator("range", &[Value::from(2)]).unwrap();
    let repeated = call_generator("repeatIterable", &[Value::from(3), restartable.into()]).unwrap();
    assert_eq!(to_array(repeated), value!([0, 1, 0, 1, 0, 1]));
}

// =============================================================================
// Laziness
// =============================================================================

#[rstest]
fn a_fused_pipeline_pulls_only_what_it_needs() {
    let pulled = Rc::new(Cell::new(0));
    let evens = call_transform("filter", &[is_even()], counted_naturals(&pulled)).unwrap();
    let firsts = call_transform("take", &[Value::from(3)], evens).unwrap();
    assert_eq!(pulled.get(), 0);
    assert_eq!(to_array(firsts), value!([0, 2, 4]));
    assert_eq!(pulled.get(), 5);
}

#[rstest]
fn take_while_stops_pulling_at_the_first_failure() {
    let pulled = Rc::new(Cell::new(0));
    let small = Function::unary(|x| Value::from(x.as_f64().is_some_and(|n| n < 4.0)));
    let output = call_transform("takeWhile", &[small.into()], counted_naturals(&pulled)).unwrap();
    assert_eq!(to_array(output), value!([0, 1, 2, 3]));
    assert_eq!(pulled.get(), 5);
}

#[rstest]
fn infinite_range_is_unbounded() {
    let naturals = call_generator("range", &[Value::Number(f64::INFINITY)]).unwrap();
    let firsts = call_transform("take", &[Value::from(4)], naturals).unwrap();
    assert_eq!(to_array(firsts), value!([0, 1, 2, 3]));
}

// =============================================================================
// Element semantics
// =============================================================================

#[rstest]
fn zip_all_pads_with_undefined_and_array_to_object_truncates() {
    let rows = call_generator("zipAll", &[value!([1, 2, 3]), value!(["a"])]).unwrap();
    let objects = call_transform("arrayToObject", &[value!(["number"])], rows).unwrap();
    assert_eq!(
        to_array(objects),
        Value::array([
            Value::object([("number", 1)]),
            Value::object([("number", 2)]),
            Value::object([("number", 3)]),
        ])
    );
}

#[rstest]
fn flatten_is_idempotent_on_flat_input() {
    let flat = Sequence::try_from(value!(["ab", "cd", 1, true])).unwrap();
    let once = call_transform("flatten", &[], flat).unwrap();
    let twice = call_transform("flatten", &[], once.clone()).unwrap();
    assert_eq!(to_array(once), value!(["ab", "cd", 1, true]));
    assert_eq!(to_array(twice), value!(["ab", "cd", 1, true]));
}

#[rstest]
fn flatten_recursive_descends_into_sequences() {
    let inner = call_generator("range", &[Value::from(2)]).unwrap();
    let nested = Sequence::from(vec![value!([[0]]), Value::from(inner), Value::from("z")]);
    let flat = call_transform("flattenRecursive", &[], nested).unwrap();
    assert_eq!(to_array(flat), value!([0, 0, 1, "z"]));
}

#[rstest]
fn caller_functions_see_undefined_for_missing_arguments() {
    let seen = Rc::new(Cell::new(false));
    let flag = Rc::clone(&seen);
    let inspect = Function::binary(move |_, second| {
        flag.set(second.is_undefined());
        Value::from(true)
    });
    let output = call_transform("filter", &[inspect.into()], Sequence::from(vec![Value::Null])).unwrap();
    assert_eq!(to_array(output), value!([Value::Null]));
    assert!(seen.get());
}

// =============================================================================
// Custom operators
// =============================================================================

#[rstest]
fn custom_transforms_compose_with_standard_ones() {
    let every_other: Transform = operator::transform(|_, input| {
        Ok(Sequence::derive(&[input.clone()], move || input.iter().step_by(2)))
    });
    let table: OperatorTable<Transform> = standard_transforms().with("everyOther", every_other);

    let range = call_generator("range", &[Value::from(7)]).unwrap();
    let thinned = table.get("everyOther").unwrap()(&[], range).unwrap();
    let firsts = table.get("take").unwrap()(&[Value::from(3)], thinned).unwrap();
    assert_eq!(to_array(firsts), value!([0, 2, 4]));
}

#[rstest]
fn argument_errors_name_the_operator() {
    let error = call_generator("repeat", &[Value::from("many")]).unwrap_err();
    assert_eq!(error.to_string(), "`repeat` expects a number at position 0, found string");

    let error = call_transform("arrayToObject", &[Value::from(1)], Sequence::empty()).unwrap_err();
    assert_eq!(error.to_string(), "`arrayToObject` expects an iterable, found number");
}
