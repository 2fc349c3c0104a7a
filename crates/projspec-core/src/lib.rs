//! # projspec-core — Foundational Types for projspec
//!
//! This crate defines the in-memory model that a validation run builds
//! before handing it to the schema validator. Every other crate in the
//! workspace depends on `projspec-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `ProjectName` and `StepId` are derived from
//!    directory names and validated at construction. A project name can
//!    never be passed where a step id is expected.
//!
//! 2. **Explicit accumulator.** [`ProjectsMap`] is created by the caller,
//!    threaded through the scan, and validated once. There is no global
//!    state.
//!
//! 3. **Order-independent step merge.** Metadata fields and instructions
//!    text are stored separately on a [`StepRecord`], so the materialized
//!    step is the same whichever file was read first.
//!
//! 4. **Typed views after validation.** [`ProjectSpec`] and [`GuidedStep`]
//!    decode an already-validated record for reporting.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `projspec-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod project;
pub mod spec;

// Re-export primary types for ergonomic imports.
pub use error::{ContentError, ContentErrors, IdentifierError};
pub use identity::{ProjectName, StepId};
pub use project::{ProjectRecord, ProjectsMap, StepFragment, StepRecord};
pub use spec::{GuidedStep, PlatformConfig, ProjectSpec, StepBreakDown};
