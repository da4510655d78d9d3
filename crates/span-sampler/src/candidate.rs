//! Sampling units: single syntax nodes and runs of sibling nodes.

use std::fmt;
use std::ops::Range;

use tree_sitter::{Node, Point};

/// Kind tag reported by every [`NodeGroup`].
pub const GROUP_KIND: &str = "_group";

/// A contiguous run of two or more sibling nodes sampled as one unit, such
/// as consecutive statements.
///
/// The nodes are assumed to be sorted and adjacent in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroup<'tree> {
    first: Node<'tree>,
    last: Node<'tree>,
}

impl<'tree> NodeGroup<'tree> {
    /// Builds a group from a run of siblings.
    ///
    /// Returns `None` when fewer than two nodes are supplied.
    #[must_use]
    pub fn new(nodes: &[Node<'tree>]) -> Option<Self> {
        let [first, .., last] = nodes else {
            return None;
        };
        Some(Self {
            first: *first,
            last: *last,
        })
    }

    /// Returns the first node of the group.
    #[must_use]
    pub const fn first(&self) -> Node<'tree> {
        self.first
    }

    /// Returns the last node of the group.
    #[must_use]
    pub const fn last(&self) -> Node<'tree> {
        self.last
    }
}

/// Identity of a candidate, used to tell apart candidates that share a
/// byte range.
///
/// Group identities are derived from the first and last member and are only
/// meaningful for de-duplication within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateId {
    /// A single node, identified by its Tree-sitter id.
    Node(usize),
    /// A node group, identified by its boundary members.
    Group {
        /// Id of the first member.
        first: usize,
        /// Id of the last member.
        last: usize,
    },
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node:{id}"),
            Self::Group { first, last } => write!(f, "group:{first}-{last}"),
        }
    }
}

/// Something that can be sampled: a node or a node group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate<'tree> {
    /// A single syntax node.
    Node(Node<'tree>),
    /// A run of sibling nodes.
    Group(NodeGroup<'tree>),
}

impl<'tree> Candidate<'tree> {
    /// Returns the candidate's identity.
    #[must_use]
    pub fn id(&self) -> CandidateId {
        match self {
            Self::Node(node) => CandidateId::Node(node.id()),
            Self::Group(group) => CandidateId::Group {
                first: group.first().id(),
                last: group.last().id(),
            },
        }
    }

    /// Returns the node kind, or [`GROUP_KIND`] for groups.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Node(node) => node.kind(),
            Self::Group(_) => GROUP_KIND,
        }
    }

    /// Returns the underlying node when this candidate is a single node.
    #[must_use]
    pub const fn as_node(&self) -> Option<Node<'tree>> {
        match self {
            Self::Node(node) => Some(*node),
            Self::Group(_) => None,
        }
    }

    /// Byte offset where the candidate starts.
    #[must_use]
    pub fn start_byte(&self) -> usize {
        match self {
            Self::Node(node) => node.start_byte(),
            Self::Group(group) => group.first().start_byte(),
        }
    }

    /// Byte offset just past the end of the candidate.
    #[must_use]
    pub fn end_byte(&self) -> usize {
        match self {
            Self::Node(node) => node.end_byte(),
            Self::Group(group) => group.last().end_byte(),
        }
    }

    /// Zero-based (row, column) where the candidate starts.
    #[must_use]
    pub fn start_point(&self) -> Point {
        match self {
            Self::Node(node) => node.start_position(),
            Self::Group(group) => group.first().start_position(),
        }
    }

    /// Zero-based (row, column) where the candidate ends.
    #[must_use]
    pub fn end_point(&self) -> Point {
        match self {
            Self::Node(node) => node.end_position(),
            Self::Group(group) => group.last().end_position(),
        }
    }

    /// Byte range covered by the candidate.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.start_byte()..self.end_byte()
    }

    /// Number of bytes covered by the candidate.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.end_byte().saturating_sub(self.start_byte())
    }
}
