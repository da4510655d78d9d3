//! Hole policy for Python: statements inside function bodies.

use tree_sitter::Node;

use super::{all_children, is_child_of};
use crate::candidate::Candidate;

/// Statements whose children are too fine-grained to sample on their own.
const SIMPLE_STATEMENTS: &[&str] = &[
    "future_import_statement",
    "import_statement",
    "import_from_statement",
    "print_statement",
    "assert_statement",
    "expression_statement",
    "return_statement",
    "delete_statement",
    "raise_statement",
    "pass_statement",
    "break_statement",
    "continue_statement",
    "global_statement",
    "nonlocal_statement",
    "exec_statement",
];

pub(super) fn is_sampled_context(node: Node<'_>) -> bool {
    is_child_of(node, "block", &["function_definition"])
}

/// Keeps single- and multi-line statements only, minus docstrings.
///
/// Groups never end in `_statement`, so they are always rejected.
pub(super) fn exclude(candidate: &Candidate<'_>) -> bool {
    !candidate.kind().ends_with("_statement") || candidate.as_node().is_some_and(is_docstring)
}

fn is_docstring(node: Node<'_>) -> bool {
    node.kind() == "expression_statement"
        && node.child_count() == 1
        && node.child(0).is_some_and(|child| child.kind() == "string")
}

pub(super) fn visit_children(node: Node<'_>) -> Vec<Node<'_>> {
    if SIMPLE_STATEMENTS.contains(&node.kind()) {
        return Vec::new();
    }
    all_children(node)
}
