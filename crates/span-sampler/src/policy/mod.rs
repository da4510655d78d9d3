//! Caller-supplied sampling policy.
//!
//! A [`SamplingPolicy`] encodes the language-specific decisions of where
//! holes may be sampled: which subtrees are eligible, which candidates are
//! never sampled, and how the collector descends through the tree.

mod java;
mod lines;
mod python;
mod rust;
mod typescript;

use tree_sitter::Node;

use crate::candidate::Candidate;
use crate::language::SupportedLanguage;

pub use lines::RestrictToLines;

/// Policy consulted by the candidate collector.
pub trait SamplingPolicy {
    /// Returns true when `node` opens a subtree whose nodes may be sampled.
    ///
    /// Eligibility is inherited: once a node qualifies, all of its
    /// descendants are eligible too.
    fn is_eligible_subtree(&self, node: Node<'_>) -> bool;

    /// Returns true when `candidate` must never be sampled.
    ///
    /// Groups are tested through their first member and then as a whole.
    fn exclude(&self, candidate: &Candidate<'_>) -> bool;

    /// Returns the children of `node` the collector should visit.
    ///
    /// Returning an empty list stops descent below `node`.
    fn visit_children<'tree>(&self, node: Node<'tree>) -> Vec<Node<'tree>> {
        all_children(node)
    }
}

/// Returns every child of `node`, named and anonymous, in source order.
#[must_use]
pub fn all_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Returns the children stored under `field` in source order.
fn field_children<'tree>(node: Node<'tree>, field: &str) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// Returns true when `node` has kind `kind` and its parent has one of
/// `parent_kinds`.
fn is_child_of(node: Node<'_>, kind: &str, parent_kinds: &[&str]) -> bool {
    node.kind() == kind
        && node
            .parent()
            .is_some_and(|parent| parent_kinds.contains(&parent.kind()))
}

/// Policy built from two closures, traversing every child.
pub struct FnPolicy<E, X> {
    eligible: E,
    exclude: X,
}

impl<E, X> FnPolicy<E, X>
where
    E: Fn(Node<'_>) -> bool,
    X: Fn(&Candidate<'_>) -> bool,
{
    /// Creates a policy from an eligibility and an exclusion predicate.
    pub const fn new(eligible: E, exclude: X) -> Self {
        Self { eligible, exclude }
    }
}

impl<E, X> SamplingPolicy for FnPolicy<E, X>
where
    E: Fn(Node<'_>) -> bool,
    X: Fn(&Candidate<'_>) -> bool,
{
    fn is_eligible_subtree(&self, node: Node<'_>) -> bool {
        (self.eligible)(node)
    }

    fn exclude(&self, candidate: &Candidate<'_>) -> bool {
        (self.exclude)(candidate)
    }
}

/// Built-in hole policy for each supported language.
///
/// Holes are restricted to function and method bodies and aligned with
/// statements, so a sampled span can be replaced by a line-level edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePolicy {
    language: SupportedLanguage,
}

impl LanguagePolicy {
    /// Returns the hole policy for `language`.
    #[must_use]
    pub const fn for_language(language: SupportedLanguage) -> Self {
        Self { language }
    }

    /// Returns the language this policy targets.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }
}

impl SamplingPolicy for LanguagePolicy {
    fn is_eligible_subtree(&self, node: Node<'_>) -> bool {
        match self.language {
            SupportedLanguage::Python => python::is_sampled_context(node),
            SupportedLanguage::Java => java::is_sampled_context(node),
            SupportedLanguage::Rust => rust::is_sampled_context(node),
            SupportedLanguage::TypeScript => typescript::is_sampled_context(node),
        }
    }

    fn exclude(&self, candidate: &Candidate<'_>) -> bool {
        match self.language {
            SupportedLanguage::Python => python::exclude(candidate),
            SupportedLanguage::Java => java::exclude(candidate),
            SupportedLanguage::Rust => rust::exclude(candidate),
            SupportedLanguage::TypeScript => typescript::exclude(candidate),
        }
    }

    fn visit_children<'tree>(&self, node: Node<'tree>) -> Vec<Node<'tree>> {
        match self.language {
            SupportedLanguage::Python => python::visit_children(node),
            SupportedLanguage::Java => java::visit_children(node),
            SupportedLanguage::Rust => rust::visit_children(node),
            SupportedLanguage::TypeScript => typescript::visit_children(node),
        }
    }
}

/// Loose policy: any node inside a function definition, nothing excluded.
///
/// Useful for eyeballing how the sampler distributes spans over a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionScopePolicy {
    language: SupportedLanguage,
}

impl FunctionScopePolicy {
    /// Returns the function-scope policy for `language`.
    #[must_use]
    pub const fn for_language(language: SupportedLanguage) -> Self {
        Self { language }
    }

    const fn function_kinds(&self) -> &'static [&'static str] {
        match self.language {
            SupportedLanguage::Python => &["function_definition"],
            SupportedLanguage::Java => &["method_declaration", "constructor_declaration"],
            SupportedLanguage::Rust => &["function_item"],
            SupportedLanguage::TypeScript => typescript::FUNCTION_KINDS,
        }
    }
}

impl SamplingPolicy for FunctionScopePolicy {
    fn is_eligible_subtree(&self, node: Node<'_>) -> bool {
        self.function_kinds().contains(&node.kind())
    }

    fn exclude(&self, _candidate: &Candidate<'_>) -> bool {
        false
    }
}
