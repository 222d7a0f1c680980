//! Policies: ability methods bundled for one subject type.

use crate::outcome::{ability_fn, before_fn};
use crate::{AbilityFn, Arg, BeforeFn, IntoOutcome};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// A set of ability checks for one subject type.
///
/// The gate maps an ability name to a method name and asks the policy for a
/// callable with [`Policy::method_for`]. A policy that returns `None` does not
/// handle the ability, and resolution falls through to the global callbacks.
pub trait Policy<U>: Send + Sync {
    /// The method answering `method`, if this policy exposes one.
    fn method_for(&self, method: &str) -> Option<AbilityFn<U>>;

    /// Runs before any method of this policy. A decided outcome skips the
    /// method.
    fn before(&self) -> Option<BeforeFn<U>> {
        None
    }
}

/// A policy backed by a method table built at registration time.
pub struct PolicyTable<U> {
    before: Option<BeforeFn<U>>,
    methods: HashMap<String, AbilityFn<U>>,
}

impl<U: Send + Sync + 'static> PolicyTable<U> {
    pub fn new() -> Self {
        Self {
            before: None,
            methods: HashMap::new(),
        }
    }

    /// Set the policy's `before` check.
    pub fn with_before<F, Fut, O>(mut self, f: F) -> Self
    where
        F: Fn(Option<Arc<U>>, String, Vec<Arg>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoOutcome,
    {
        self.before = Some(before_fn(f));
        self
    }

    /// Add (or replace) the method named `name`.
    pub fn with_method<F, Fut, O>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<Arc<U>>, Vec<Arg>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoOutcome,
    {
        self.methods.insert(name.into(), ability_fn(f));
        self
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl<U: Send + Sync + 'static> Default for PolicyTable<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Send + Sync + 'static> Policy<U> for PolicyTable<U> {
    fn method_for(&self, method: &str) -> Option<AbilityFn<U>> {
        self.methods.get(method).cloned()
    }

    fn before(&self) -> Option<BeforeFn<U>> {
        self.before.clone()
    }
}

impl<U> fmt::Debug for PolicyTable<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("PolicyTable")
            .field("before", &self.before.is_some())
            .field("methods", &methods)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Outcome, Response};

    #[derive(Debug)]
    struct User {
        id: u64,
    }

    #[tokio::test]
    async fn table_exposes_registered_methods() {
        let table = PolicyTable::<User>::new()
            .with_method("update", |user: Option<Arc<User>>, _args: Vec<Arg>| async move {
                user.is_some_and(|u| u.id == 1)
            })
            .with_method("delete", |_user: Option<Arc<User>>, _args: Vec<Arg>| async move {
                Response::deny_as_not_found()
            });

        let update = table.method_for("update").unwrap();
        let outcome = update(Some(Arc::new(User { id: 1 })), Vec::new()).await;
        assert_eq!(outcome.unwrap(), Some(Outcome::Bool(true)));

        let delete = table.method_for("delete").unwrap();
        let outcome = delete(None, Vec::new()).await.unwrap();
        assert_eq!(outcome, Some(Outcome::Response(Response::deny_as_not_found())));

        assert!(table.method_for("publish").is_none());
        assert!(table.before().is_none());
    }

    #[tokio::test]
    async fn table_before_is_exposed() {
        let table = PolicyTable::<User>::new().with_before(
            |user: Option<Arc<User>>, _ability: String, _args: Vec<Arg>| async move {
                user.is_some_and(|u| u.id == 0).then_some(true)
            },
        );

        let before = table.before().unwrap();
        let admin = before(Some(Arc::new(User { id: 0 })), "update".into(), Vec::new()).await;
        assert_eq!(admin.unwrap(), Some(Outcome::Bool(true)));

        let other = before(Some(Arc::new(User { id: 2 })), "update".into(), Vec::new()).await;
        assert_eq!(other.unwrap(), None);
    }

    #[test]
    fn methods_lists_names_once() {
        let table = PolicyTable::<User>::new()
            .with_method("view", |_: Option<Arc<User>>, _: Vec<Arg>| async { true })
            .with_method("update", |_: Option<Arc<User>>, _: Vec<Arg>| async { true })
            .with_method("view", |_: Option<Arc<User>>, _: Vec<Arg>| async { false });

        let mut names: Vec<_> = table.methods().collect();
        names.sort_unstable();
        assert_eq!(names, ["update", "view"]);
    }

    #[test]
    fn debug_lists_methods_sorted() {
        let table = PolicyTable::<User>::new()
            .with_method("view", |_: Option<Arc<User>>, _: Vec<Arg>| async { true })
            .with_method("create", |_: Option<Arc<User>>, _: Vec<Arg>| async { true });
        assert_eq!(
            format!("{table:?}"),
            r#"PolicyTable { before: false, methods: ["create", "view"] }"#
        );
    }
}
