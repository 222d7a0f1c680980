//! An in-process authorization gate.
//!
//! Abilities are named checks. A check asks whether the ambient principal may
//! perform an ability, optionally against subject arguments, and resolves
//! through:
//!
//! 1. **Before hooks**, in registration order. The first decided outcome wins
//!    and skips the rest of resolution except the after hooks.
//! 2. **A policy method**, when the first argument is a subject (or subject
//!    type) with a registered policy exposing the method derived from the
//!    ability name (`create-post` asks for `createPost`). The policy's own
//!    `before` runs first.
//! 3. **A defined ability callback**.
//! 4. **After hooks**, in registration order, while still undecided.
//!
//! An outcome nobody decided is a denial.
//!
//! The principal is never passed in: [`run_scoped`] makes it ambient for
//! everything the body awaits, isolated from concurrently running scopes.
//!
//! # Example
//!
//! ```
//! use gate::{Arg, Gate, run_scoped};
//! use std::sync::Arc;
//!
//! struct User {
//!     admin: bool,
//! }
//!
//! # async fn example() -> gate::Result<()> {
//! let mut gate = Gate::new();
//! gate.define("view-reports", |user: Option<Arc<User>>, _args: Vec<Arg>| async move {
//!     user.is_some_and(|u| u.admin)
//! })?;
//!
//! let allowed = run_scoped(Some(User { admin: true }), gate.allows("view-reports", &[])).await?;
//! assert!(allowed);
//!
//! let err = gate.authorize("view-reports", &[]).await.unwrap_err();
//! assert!(err.is_denied());
//! # Ok(())
//! # }
//! ```

mod ability;
mod config;
pub mod context;
mod error;
mod gate;

pub use ability::{Abilities, method_name};
pub use config::GateConfig;
pub use context::{current_principal, run_scoped, run_shared, sync_scoped};
pub use error::{Error, Result};
pub use gate::{ForUser, Gate};

// Policy building blocks
pub use policy::{
    Arg, IntoOutcome, Outcome, Policy, PolicyRegistry, PolicyTable, Response, Subject,
    SubjectKind,
};
