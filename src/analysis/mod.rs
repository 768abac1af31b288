//! Language-agnostic analysis core.
//!
//! The core sits between a parsed syntax tree and the two published
//! results:
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌──────────────────┐
//! │ Language     │───▶│ Rule Compiler │───▶│ Compiled         │
//! │ Definition   │    │ (once)        │    │ Definition       │
//! └──────────────┘    └───────────────┘    └────────┬─────────┘
//!                                                   │
//!        ┌──────────────┐                           ▼
//!        │ Syntax tree  │──── Tree Walker ──▶ Metrics Engine ────▶ MetricsResult
//!        │ (tree-sitter)│                └──▶ Extraction Engine ─▶ ExtractionResult
//!        └──────────────┘
//! ```
//!
//! Language definitions are data: node-type maps plus calculation config.
//! New languages add tables under `crate::languages`, not engine code.

pub mod compile;
pub mod definition;
pub mod extraction;
pub mod metrics;
pub mod walker;

pub use compile::{CalculationExtensions, CompiledDefinition, MetricIndex};
pub use definition::{
    CalculationConfig, CommentDecode, CommentFormat, CustomMulti, CustomSingle, Extract,
    ExtractionStrategy, IdentifierExtract, IgnoreRule, LanguageDefinition, LeafNodeRule, Metric,
    MetricCondition, StringDecode, StringFormat,
};
pub use extraction::{ExtractedText, ExtractionContext, ExtractionResult};
pub use metrics::{MetricsResult, SeriesStats, CHAIN_LINK_THRESHOLD};
pub use walker::TreeVisitor;
