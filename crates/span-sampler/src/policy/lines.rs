//! Restricting an existing policy to a set of source lines.

use std::collections::BTreeSet;

use tree_sitter::{Node, Point};

use super::SamplingPolicy;
use crate::candidate::Candidate;

/// Wraps a policy so that only subtrees touching `lines` are eligible.
///
/// Lines are one-based. A subtree touches a line when the line falls between
/// its first and last lines, inclusive.
#[derive(Debug, Clone)]
pub struct RestrictToLines<P> {
    inner: P,
    lines: BTreeSet<u32>,
}

impl<P: SamplingPolicy> RestrictToLines<P> {
    /// Wraps `inner`, admitting only subtrees that touch one of `lines`.
    pub fn new(inner: P, lines: impl IntoIterator<Item = u32>) -> Self {
        Self {
            inner,
            lines: lines.into_iter().collect(),
        }
    }

    fn touches_lines(&self, node: Node<'_>) -> bool {
        let first = one_based_line(node.start_position());
        let last = one_based_line(node.end_position());
        self.lines
            .range(first..=last)
            .next()
            .is_some()
    }
}

fn one_based_line(point: Point) -> u32 {
    u32::try_from(point.row)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

impl<P: SamplingPolicy> SamplingPolicy for RestrictToLines<P> {
    fn is_eligible_subtree(&self, node: Node<'_>) -> bool {
        self.inner.is_eligible_subtree(node) && self.touches_lines(node)
    }

    fn exclude(&self, candidate: &Candidate<'_>) -> bool {
        self.inner.exclude(candidate)
    }

    fn visit_children<'tree>(&self, node: Node<'tree>) -> Vec<Node<'tree>> {
        self.inner.visit_children(node)
    }
}
