pub mod canonical;
pub mod type_set;
