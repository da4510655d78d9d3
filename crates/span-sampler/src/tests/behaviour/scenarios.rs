//! Scenario bindings for the `span-sampler` BDD feature file.
//!
//! These functions bind Gherkin scenario names to the step definitions in the
//! parent module.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/span_sampler.feature",
    name = "Every covered character is weighted exactly once"
)]
fn every_character_weighted_once(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/span_sampler.feature",
    name = "Eligibility restricted to function definitions"
)]
fn eligibility_restricted_to_functions(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/span_sampler.feature",
    name = "Excluded nodes never appear in sampled spans"
)]
fn excluded_nodes_never_sampled(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/span_sampler.feature",
    name = "Drawing more spans than candidates without replacement"
)]
fn oversized_draw_without_replacement(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/span_sampler.feature",
    name = "Drawing with replacement returns every draw"
)]
fn draw_with_replacement(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/span_sampler.feature",
    name = "Negative temperature is rejected"
)]
fn negative_temperature_rejected(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/span_sampler.feature",
    name = "Nothing eligible yields no spans"
)]
fn nothing_eligible(world: RefCell<TestWorld>) {
    drop(world);
}
