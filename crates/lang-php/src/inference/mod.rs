//! Property type inference.
//!
//! Infers the types a property may hold from the evidence around it.
//!
//! # Architecture
//!
//! ```text
//! PropertyTypeInferer      →  strategies sorted by priority, first non-empty wins
//!       │
//!       ▼
//! PropertyTypeStrategy     →  constructor parameters (800), all assignments (500)
//!       │
//!       ▼
//! evidence                 →  assignment sites, evaluated through a TypeOracle
//!       │
//!       ▼
//! core::canonical          →  StaticType → canonical type strings
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use docsync_php::inference::{FieldRef, InferContext, InferenceOptions, PropertyTypeInferer};
//!
//! let options = InferenceOptions::default();
//! let ctx = InferContext::new(&oracle, &options);
//! let types = PropertyTypeInferer::with_defaults(&options)
//!     .infer_property(&FieldRef::new(property, &class), &ctx)?;
//! ```

pub mod adapters;
pub mod context;
pub mod core;
pub mod evidence;
mod pipeline;
pub mod strategy;

pub use context::{FieldRef, InferContext, InferenceOptions, StrategyKind};
pub use core::canonical::resolve as resolve_type_strings;
pub use core::type_set::{TypeName, TypeSet};
pub use pipeline::PropertyTypeInferer;
pub use strategy::PropertyTypeStrategy;
