//! Hole policy for Java: statements inside method bodies.

use tree_sitter::Node;

use super::{all_children, field_children, is_child_of};
use crate::candidate::Candidate;

const EXCLUDED_KINDS: &[&str] = &[
    "line_comment",
    "block_comment",
    "block",
    "switch_block",
    "{",
    "}",
    ":",
    "catch_clause",
    "finally_clause",
];

pub(super) fn is_sampled_context(node: Node<'_>) -> bool {
    is_child_of(node, "block", &["method_declaration"])
}

pub(super) fn exclude(candidate: &Candidate<'_>) -> bool {
    EXCLUDED_KINDS.contains(&candidate.kind())
        || candidate.as_node().is_some_and(is_nested_else_if)
}

fn is_nested_else_if(node: Node<'_>) -> bool {
    node.kind() == "if_statement"
        && node
            .parent()
            .is_some_and(|parent| parent.kind() == "if_statement")
}

pub(super) fn visit_children(node: Node<'_>) -> Vec<Node<'_>> {
    match node.kind() {
        "expression_statement"
        | "local_variable_declaration"
        | "return_statement"
        | "throw_statement" => Vec::new(),
        "if_statement" => {
            let mut children = field_children(node, "consequence");
            children.extend(field_children(node, "alternative"));
            children
        }
        "for_statement"
        | "enhanced_for_statement"
        | "while_statement"
        | "try_with_resources_statement"
        | "catch_clause"
        | "finally_clause" => field_children(node, "body"),
        _ => all_children(node),
    }
}
