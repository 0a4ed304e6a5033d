//! Write-site evidence for a named property.

pub mod assign;
pub mod walker;

pub use assign::{infer_in_class_like, infer_in_method};
pub use walker::{PropertyAssign, find_param_bound_to_property, find_property_assigns};
