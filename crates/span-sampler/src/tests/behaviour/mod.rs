//! Behaviour-driven development (BDD) step definitions for span-sampler scenarios.

mod scenarios;

use std::cell::RefCell;
use std::collections::HashSet;
use std::ops::Range;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::fixture;
use rstest_bdd_macros::{given, then, when};
use tree_sitter::Node;

use super::SAMPLE_CODE;
use crate::{
    Candidate, CandidateBounds, FnPolicy, ParseResult, Parser, SamplingConfig, SamplingError,
    SupportedLanguage, all_children, collect_candidates, merge_spans, sample, weigh_candidates,
};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// Parsed sample module.
    parsed: Option<ParseResult>,
    /// Node kind that opens an eligible subtree; everything when unset.
    eligible_kind: Option<String>,
    /// Node kind that is never sampled.
    excluded_kind: Option<String>,
    /// Byte ranges of the collected candidates.
    candidate_spans: Vec<Range<usize>>,
    /// Sum of the candidate weights.
    weight_total: f64,
    /// Number of candidates available to the last sampling call.
    available: usize,
    /// Minimum span length for sampling calls; the library default when unset.
    min_bytes: Option<usize>,
    /// Candidate indices drawn by the last sampling call.
    sampled: Vec<usize>,
    /// Text of the spans drawn by the last sampling call.
    sampled_texts: Vec<String>,
    /// Error raised by the last sampling call.
    error: Option<SamplingError>,
}

impl TestWorld {
    fn parsed(&self) -> &ParseResult {
        self.parsed
            .as_ref()
            .expect("the sample module should be parsed first")
    }

    fn candidate_texts(&self) -> Vec<&str> {
        let source = self.parsed().source();
        self.candidate_spans
            .iter()
            .filter_map(|span| source.get(span.clone()))
            .collect()
    }
}

/// Builds a policy from the configured kinds without borrowing the world.
fn kind_policy(
    eligible_kind: Option<String>,
    excluded_kind: Option<String>,
) -> FnPolicy<impl Fn(Node<'_>) -> bool, impl Fn(&Candidate<'_>) -> bool> {
    FnPolicy::new(
        move |node: Node<'_>| eligible_kind.as_deref().is_none_or(|kind| node.kind() == kind),
        move |candidate: &Candidate<'_>| excluded_kind.as_deref() == Some(candidate.kind()),
    )
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

/// Collects the byte ranges of every node of `kind` below `node`.
fn spans_of_kind(node: Node<'_>, kind: &str, spans: &mut Vec<Range<usize>>) {
    if node.kind() == kind {
        spans.push(node.byte_range());
    }
    for child in all_children(node) {
        spans_of_kind(child, kind, spans);
    }
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("the sample Python module")]
fn given_sample_module(world: &RefCell<TestWorld>) {
    let mut parser = Parser::new(SupportedLanguage::Python).expect("parser init");
    world.borrow_mut().parsed = Some(parser.parse(SAMPLE_CODE).expect("parse"));
}

#[given("eligibility restricted to {kind} nodes")]
fn given_eligible_kind(world: &RefCell<TestWorld>, kind: String) {
    world.borrow_mut().eligible_kind = Some(strip_quotes(&kind).to_owned());
}

#[given("{kind} nodes are excluded")]
fn given_excluded_kind(world: &RefCell<TestWorld>, kind: String) {
    world.borrow_mut().excluded_kind = Some(strip_quotes(&kind).to_owned());
}

#[given("a minimum span length of {min_bytes}")]
fn given_min_bytes(world: &RefCell<TestWorld>, min_bytes: usize) {
    world.borrow_mut().min_bytes = Some(min_bytes);
}

// =============================================================================
// When Steps
// =============================================================================

#[when("candidates are collected with a minimum length of {min_bytes}")]
fn when_collect(world: &RefCell<TestWorld>, min_bytes: usize) {
    let mut w = world.borrow_mut();
    let policy = kind_policy(w.eligible_kind.clone(), w.excluded_kind.clone());
    let parsed = w.parsed();
    let candidates = collect_candidates(
        parsed.root_node(),
        &policy,
        CandidateBounds::new(min_bytes, 1000),
    );
    let spans: Vec<_> = candidates.iter().map(Candidate::byte_range).collect();
    let total = weigh_candidates(candidates, parsed.source().as_bytes()).total();

    w.candidate_spans = spans;
    w.weight_total = total;
}

fn sample_into_world(world: &RefCell<TestWorld>, base: &SamplingConfig) {
    let mut w = world.borrow_mut();
    let config = SamplingConfig {
        min_bytes_length: w.min_bytes.unwrap_or(base.min_bytes_length),
        ..base.clone()
    };
    let policy = kind_policy(w.eligible_kind.clone(), w.excluded_kind.clone());
    let parsed = w.parsed();
    let source = parsed.source();
    let available = collect_candidates(parsed.root_node(), &policy, config.bounds()).len();
    let result: Result<Vec<(usize, String)>, SamplingError> = sample(
        parsed.root_node(),
        source.as_bytes(),
        &policy,
        &config,
        &mut StdRng::seed_from_u64(11),
    )
    .map(|spans| {
        spans
            .iter()
            .map(|span| {
                let text = span.text(source).unwrap_or_default().to_owned();
                (span.candidate_index, text)
            })
            .collect()
    });

    w.available = available;
    match result {
        Ok(sampled) => {
            let (indices, texts): (Vec<usize>, Vec<String>) = sampled.into_iter().unzip();
            w.sampled = indices;
            w.sampled_texts = texts;
        }
        Err(error) => w.error = Some(error),
    }
}

#[when("{count} spans are sampled without replacement")]
fn when_sample_without_replacement(world: &RefCell<TestWorld>, count: usize) {
    let config = SamplingConfig {
        num_samples: count,
        ..SamplingConfig::default()
    };
    sample_into_world(world, &config);
}

#[when("{count} spans are sampled with replacement")]
fn when_sample_with_replacement(world: &RefCell<TestWorld>, count: usize) {
    let config = SamplingConfig {
        num_samples: count,
        sample_with_replacement: true,
        ..SamplingConfig::default()
    };
    sample_into_world(world, &config);
}

#[when("spans are sampled at temperature {temperature}")]
fn when_sample_at_temperature(world: &RefCell<TestWorld>, temperature: String) {
    let config = SamplingConfig {
        temperature: strip_quotes(&temperature)
            .parse()
            .expect("temperature should be numeric"),
        ..SamplingConfig::default()
    };
    sample_into_world(world, &config);
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("the merged coverage spans the whole file")]
fn then_coverage_is_whole_file(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let merged = merge_spans(w.candidate_spans.iter().cloned());
    assert_eq!(merged, vec![0..SAMPLE_CODE.len()]);
}

#[then("the weights sum to {total}")]
fn then_weights_sum_to(world: &RefCell<TestWorld>, total: u32) {
    let w = world.borrow();
    let difference = (w.weight_total - f64::from(total)).abs();
    assert!(difference < 1e-9, "weights sum to {}", w.weight_total);
}

#[then("the merged coverage equals the {kind} nodes")]
fn then_coverage_equals_kind(world: &RefCell<TestWorld>, kind: String) {
    let w = world.borrow();
    let mut expected = Vec::new();
    spans_of_kind(w.parsed().root_node(), strip_quotes(&kind), &mut expected);

    let merged = merge_spans(w.candidate_spans.iter().cloned());
    assert_eq!(merged, merge_spans(expected));
}

#[then("{text} is among the candidates")]
fn then_text_is_candidate(world: &RefCell<TestWorld>, text: String) {
    let w = world.borrow();
    let wanted = strip_quotes(&text);
    assert!(
        w.candidate_texts().contains(&wanted),
        "{wanted:?} missing from candidates"
    );
}

#[then("{text} is absent from the candidates")]
fn then_text_is_not_candidate(world: &RefCell<TestWorld>, text: String) {
    let w = world.borrow();
    let unwanted = strip_quotes(&text);
    assert!(
        !w.candidate_texts().contains(&unwanted),
        "{unwanted:?} unexpectedly collected"
    );
}

#[then("every candidate is sampled exactly once")]
fn then_every_candidate_once(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let distinct: HashSet<_> = w.sampled.iter().collect();
    assert!(w.available > 0);
    assert_eq!(w.sampled.len(), w.available);
    assert_eq!(distinct.len(), w.available);
}

#[then("{count} spans are returned")]
fn then_span_count(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    assert!(w.error.is_none(), "unexpected error: {:?}", w.error);
    assert_eq!(w.sampled.len(), count);
}

#[then("sampling fails with an invalid argument")]
fn then_invalid_argument(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert!(
        matches!(w.error, Some(SamplingError::InvalidArgument { .. })),
        "expected invalid argument, got {:?}",
        w.error
    );
}

#[then("{text} is never sampled")]
fn then_text_never_sampled(world: &RefCell<TestWorld>, text: String) {
    let w = world.borrow();
    let unwanted = strip_quotes(&text);
    assert!(!w.sampled_texts.is_empty(), "nothing was sampled");
    assert!(
        w.sampled_texts.iter().all(|sampled| sampled != unwanted),
        "{unwanted:?} was sampled"
    );
}
