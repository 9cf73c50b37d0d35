//! summark-core — Rule engine, matchers, and verdict scoring.
//!
//! This crate defines the rubric corpus, the collaborator traits, the
//! individual compliance checks, and the evaluator that reduces them to a
//! single pass/fail verdict.

pub mod corpus;
pub mod engine;
pub mod entity;
pub mod lexical;
pub mod model;
pub mod report;
pub mod rules;
pub mod semantic;
pub mod tokenize;

pub use engine::Evaluator;
pub use model::{RuleKind, RuleResult};
pub use report::VerdictReport;
