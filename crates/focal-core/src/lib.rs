//! Focal Core — domain models, error taxonomy, and store traits shared
//! across the Focal gallery platform crates.

pub mod error;
pub mod models;
pub mod store;

pub use error::{FocalError, FocalResult};
pub use store::UserStore;
