//! Agent domain types: configuration record, editable fields, panel state.

pub mod config_model;
pub mod fields;
pub mod types;

pub use config_model::*;
pub use fields::*;
pub use types::*;
