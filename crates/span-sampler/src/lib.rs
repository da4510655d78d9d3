//! Syntax-constrained span sampling over Tree-sitter trees.
//!
//! This crate samples representative, syntactically well-formed spans
//! ("holes") from a parsed source file, for use as infilling targets or edit
//! regions. Spans are sampled so that every non-whitespace character covered
//! by an eligible span is equally likely to be selected; a temperature then
//! biases selection towards longer or shorter spans.
//!
//! The pipeline has three stages:
//!
//! - **Collection** via [`collect_candidates`]: one iterative walk of the
//!   tree gathers eligible nodes and runs of sibling nodes ([`NodeGroup`]),
//!   as decided by a [`SamplingPolicy`]
//! - **Weighting** via [`weigh_candidates`]: overlapping candidates share the
//!   characters they have in common
//! - **Selection** via [`select_indices`]: temperature-adjusted weighted
//!   draws, with or without replacement
//!
//! [`sample`] runs all three.
//!
//! # Supported Languages
//!
//! Built-in [`LanguagePolicy`] hole policies exist for:
//! - Rust (`.rs`)
//! - Python (`.py`, `.pyi`)
//! - Java (`.java`)
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use span_sampler::{LanguagePolicy, Parser, SamplingConfig, SupportedLanguage, sample};
//!
//! let mut parser = Parser::new(SupportedLanguage::Python)?;
//! let parsed = parser.parse("def f(x):\n    y = x * 2\n    return y + 1\n")?;
//! let policy = LanguagePolicy::for_language(SupportedLanguage::Python);
//! let config = SamplingConfig { min_bytes_length: 4, ..SamplingConfig::default() };
//!
//! let spans = sample(
//!     parsed.root_node(),
//!     parsed.source().as_bytes(),
//!     &policy,
//!     &config,
//!     &mut StdRng::seed_from_u64(7),
//! )?;
//! assert_eq!(spans.len(), 1);
//! # Ok::<(), span_sampler::SamplingError>(())
//! ```

mod candidate;
mod collector;
mod error;
mod language;
mod parser;
mod policy;
mod sampling;
mod temperature;
mod weighting;

pub use candidate::{Candidate, CandidateId, GROUP_KIND, NodeGroup};
pub use collector::{CandidateBounds, collect_candidates};
pub use error::SamplingError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use parser::{ParseResult, Parser};
pub use policy::{
    FnPolicy, FunctionScopePolicy, LanguagePolicy, RestrictToLines, SamplingPolicy, all_children,
};
pub use sampling::{SampledSpan, SamplingConfig, sample};
pub use temperature::{Draws, Temperature, select_indices};
pub use weighting::{WeightedCandidates, merge_spans, non_whitespace_chars, weigh_candidates};
