//! Eligible-candidate collection.
//!
//! Walks the syntax tree once with an explicit stack and gathers every node
//! and every run of sibling nodes that the policy admits and whose byte
//! length fits the configured bounds.

use tree_sitter::Node;

use crate::candidate::{Candidate, NodeGroup};
use crate::policy::SamplingPolicy;

/// Length bounds for a candidate: `min < byte_len <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateBounds {
    min_bytes: usize,
    max_bytes: usize,
}

impl CandidateBounds {
    /// Creates bounds admitting lengths in `(min_bytes, max_bytes]`.
    #[must_use]
    pub const fn new(min_bytes: usize, max_bytes: usize) -> Self {
        Self {
            min_bytes,
            max_bytes,
        }
    }

    /// Returns true when `len` is strictly longer than the minimum and no
    /// longer than the maximum.
    #[must_use]
    pub const fn admits(self, len: usize) -> bool {
        self.min_bytes < len && len <= self.max_bytes
    }

    /// Returns true when nothing of length `len`, or shorter, can be
    /// admitted.
    const fn is_too_short(self, len: usize) -> bool {
        len <= self.min_bytes
    }
}

/// Collects every candidate in the tree rooted at `root`.
///
/// A node is a candidate when it lies in an eligible subtree, is not
/// excluded, and its length fits `bounds`. Nodes at or below the minimum
/// length are pruned along with their children. Inside eligible subtrees,
/// runs of two or more consecutive children form [`NodeGroup`] candidates.
///
/// Never fails: an ineligible tree yields an empty list.
pub fn collect_candidates<'tree, P>(
    root: Node<'tree>,
    policy: &P,
    bounds: CandidateBounds,
) -> Vec<Candidate<'tree>>
where
    P: SamplingPolicy + ?Sized,
{
    let mut to_visit = vec![(root, policy.is_eligible_subtree(root))];
    let mut candidates = Vec::new();

    while let Some((node, in_eligible_subtree)) = to_visit.pop() {
        let len = node.byte_range().len();
        if bounds.is_too_short(len) {
            // Children are never longer than their parent.
            continue;
        }

        let candidate = Candidate::Node(node);
        if bounds.admits(len) && in_eligible_subtree && !policy.exclude(&candidate) {
            candidates.push(candidate);
        }

        let children = policy.visit_children(node);
        to_visit.extend(
            children
                .iter()
                .map(|&child| (child, in_eligible_subtree || policy.is_eligible_subtree(child))),
        );

        if in_eligible_subtree {
            collect_groups(&children, policy, bounds, &mut candidates);
        }
    }

    tracing::debug!(count = candidates.len(), "collected candidates");
    candidates
}

/// Adds runs of consecutive `children` as group candidates.
///
/// A run starting at an excluded child is skipped; runs never end at the
/// last child. Growth of a run stops once it exceeds the maximum length.
fn collect_groups<'tree, P>(
    children: &[Node<'tree>],
    policy: &P,
    bounds: CandidateBounds,
    candidates: &mut Vec<Candidate<'tree>>,
) where
    P: SamplingPolicy + ?Sized,
{
    for (start, &first) in children.iter().enumerate() {
        if policy.exclude(&Candidate::Node(first)) {
            continue;
        }

        for end in start.saturating_add(2)..children.len() {
            let Some(group) = children.get(start..end).and_then(NodeGroup::new) else {
                continue;
            };
            let candidate = Candidate::Group(group);
            let len = candidate.byte_len();
            if bounds.admits(len) && !policy.exclude(&candidate) {
                candidates.push(candidate);
            } else if len > bounds.max_bytes {
                break;
            }
        }
    }
}
