//! Store trait definitions for data access abstraction.
//!
//! All store operations are async. The session/tenant core issues
//! reads only; `create` exists because registration and OAuth first
//! login insert the row whose id subsequent tokens reference.

use uuid::Uuid;

use crate::error::FocalResult;
use crate::models::user::{CreateUser, User};

/// Durable record of user accounts.
///
/// Lookup misses surface as [`FocalError::NotFound`] — a verified token
/// whose subject row has since been deleted is an expected condition,
/// not a server error.
///
/// [`FocalError::NotFound`]: crate::error::FocalError::NotFound
pub trait UserStore: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = FocalResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = FocalResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = FocalResult<User>> + Send;
}
