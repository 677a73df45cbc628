//! Advisor Runtime - narrows the catalog and asks an LLM to rank it
//!
//! # Architecture
//!
//! One advisory request follows a fixed path:
//! 1. **Candidate selection** (`advisor_core::filter`) - smart filter or full catalog
//! 2. **Prompting** (`prompt`) - render the query and candidates for the model
//! 3. **Ranking** (`llm`) - a single blocking call to the configured provider
//! 4. **Reply parsing** (`reply`) - turn model text into an `AdvisorResponse`
//!
//! Sorting the returned recommendations stays with the caller, see
//! `advisor_core::sorting`.
//!
//! The model only ranks and explains the candidates it was given.

pub mod llm;
pub mod prompt;
pub mod reply;
pub mod runtime;
