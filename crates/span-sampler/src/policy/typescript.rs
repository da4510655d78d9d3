//! Hole policy for TypeScript: statements inside function bodies.

use tree_sitter::Node;

use super::{all_children, field_children, is_child_of};
use crate::candidate::Candidate;

/// Node kinds whose `body` is a function body.
pub(super) const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "generator_function_declaration",
    "arrow_function",
    "method_definition",
];

const EXCLUDED_KINDS: &[&str] = &["comment", "statement_block", "{", "}", "else_clause"];

pub(super) fn is_sampled_context(node: Node<'_>) -> bool {
    is_child_of(node, "statement_block", FUNCTION_KINDS)
}

pub(super) fn exclude(candidate: &Candidate<'_>) -> bool {
    EXCLUDED_KINDS.contains(&candidate.kind())
        || candidate.as_node().is_some_and(|node| {
            node.kind() == "if_statement"
                && node
                    .parent()
                    .is_some_and(|parent| parent.kind() == "else_clause")
        })
}

pub(super) fn visit_children(node: Node<'_>) -> Vec<Node<'_>> {
    match node.kind() {
        "expression_statement"
        | "lexical_declaration"
        | "variable_declaration"
        | "return_statement"
        | "throw_statement" => Vec::new(),
        "if_statement" => {
            let mut children = field_children(node, "consequence");
            children.extend(field_children(node, "alternative"));
            children
        }
        "for_statement" | "for_in_statement" | "while_statement" | "do_statement" => {
            field_children(node, "body")
        }
        _ => all_children(node),
    }
}
