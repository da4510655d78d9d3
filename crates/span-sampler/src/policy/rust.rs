//! Hole policy for Rust: statements inside function bodies.

use tree_sitter::Node;

use super::{all_children, field_children, is_child_of};
use crate::candidate::Candidate;

const EXCLUDED_KINDS: &[&str] = &[
    "line_comment",
    "block_comment",
    "block",
    "match_block",
    "{",
    "}",
    "else_clause",
];

pub(super) fn is_sampled_context(node: Node<'_>) -> bool {
    is_child_of(node, "block", &["function_item"])
}

pub(super) fn exclude(candidate: &Candidate<'_>) -> bool {
    EXCLUDED_KINDS.contains(&candidate.kind())
        || candidate.as_node().is_some_and(|node| {
            node.kind() == "if_expression"
                && node
                    .parent()
                    .is_some_and(|parent| parent.kind() == "else_clause")
        })
}

pub(super) fn visit_children(node: Node<'_>) -> Vec<Node<'_>> {
    match node.kind() {
        "let_declaration"
        | "macro_invocation"
        | "return_expression"
        | "call_expression"
        | "assignment_expression"
        | "compound_assignment_expr" => Vec::new(),
        "if_expression" => {
            let mut children = field_children(node, "consequence");
            children.extend(field_children(node, "alternative"));
            children
        }
        "for_expression" | "while_expression" | "loop_expression" => {
            field_children(node, "body")
        }
        _ => all_children(node),
    }
}
