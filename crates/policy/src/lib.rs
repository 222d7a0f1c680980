//! Policy building blocks for the gate.
//!
//! This crate holds the values that flow through an authorization check:
//!
//! - **Response**: the allow/deny result with optional message, application
//!   code and HTTP-style status. [`Response::authorize`] turns a denial into
//!   [`Error::Denied`].
//! - **Outcome**: what a callback decided. `None` means undecided.
//! - **Subjects**: [`SubjectKind`] names a subject type and its parent,
//!   [`Subject`] ties a value to its kind, and [`Arg`] carries instances, type
//!   references and plain data into a check.
//! - **Policies**: the [`Policy`] trait, the table-backed [`PolicyTable`], and
//!   the [`PolicyRegistry`] that finds the policy for a subject.
//!
//! # Example
//!
//! ```
//! use policy::{Arg, PolicyRegistry, PolicyTable, Subject, SubjectKind};
//! use std::sync::Arc;
//!
//! static POST: SubjectKind = SubjectKind::new("Post");
//!
//! struct Post {
//!     author: u64,
//! }
//!
//! impl Subject for Post {
//!     fn kind(&self) -> &'static SubjectKind {
//!         &POST
//!     }
//! }
//!
//! let posts = PolicyTable::new().with_method("update", |user: Option<Arc<u64>>, args: Vec<Arg>| async move {
//!     let author = args.first().and_then(|a| a.downcast_ref::<Post>()).map(|p| p.author);
//!     user.is_some_and(|id| Some(*id) == author)
//! });
//!
//! let mut registry = PolicyRegistry::new();
//! registry.register(&POST, Arc::new(posts));
//!
//! assert!(registry.policy_for(&Arg::subject(Post { author: 1 })).is_some());
//! ```

mod error;
mod outcome;
mod policy;
mod registry;
mod response;
mod subject;

pub use error::{BoxError, DEFAULT_DENIAL_MESSAGE, Error, Result};
pub use outcome::{
    AbilityFn, AfterFn, BeforeFn, IntoOutcome, Outcome, OutcomeFuture, ability_fn, after_fn,
    before_fn,
};
pub use policy::{Policy, PolicyTable};
pub use registry::PolicyRegistry;
pub use response::Response;
pub use subject::{Arg, Subject, SubjectKind, SubjectRef};
