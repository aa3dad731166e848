//! Domain models for Focal.
//!
//! Only the identity read model lives here — gallery, photo, and
//! billing entities belong to their own service crates.

pub mod user;
