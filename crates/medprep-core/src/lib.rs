//! medprep-core: question bank model, filtering, and answer evaluation.
//!
//! This crate holds everything a presentation layer needs: loading the
//! question bank, querying it by kind and medical system, evaluating
//! submitted answers, and keeping per-session interaction state.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod letter;
pub mod model;
pub mod parser;
pub mod query;
pub mod session;
pub mod summary;
