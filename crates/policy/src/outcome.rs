//! Callback outcomes and callback shapes.

use crate::{Arg, Response, Result};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;

/// A decided outcome. An undecided outcome is `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Bool(bool),
    Response(Response),
}

impl Outcome {
    pub fn is_allowed(&self) -> bool {
        match self {
            Self::Bool(allowed) => *allowed,
            Self::Response(response) => response.allowed(),
        }
    }
}

impl From<bool> for Outcome {
    fn from(allowed: bool) -> Self {
        Self::Bool(allowed)
    }
}

impl From<Response> for Outcome {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

/// Values a callback may produce.
///
/// `()` and `None` leave the decision open; `Err` propagates to the caller of
/// the check.
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<Option<Outcome>>;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Result<Option<Outcome>> {
        Ok(Some(self))
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Result<Option<Outcome>> {
        Ok(Some(Outcome::Bool(self)))
    }
}

impl IntoOutcome for Response {
    fn into_outcome(self) -> Result<Option<Outcome>> {
        Ok(Some(Outcome::Response(self)))
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<Option<Outcome>> {
        Ok(None)
    }
}

impl<T: IntoOutcome> IntoOutcome for Option<T> {
    fn into_outcome(self) -> Result<Option<Outcome>> {
        self.map_or(Ok(None), IntoOutcome::into_outcome)
    }
}

impl<T: IntoOutcome> IntoOutcome for Result<T> {
    fn into_outcome(self) -> Result<Option<Outcome>> {
        self.and_then(IntoOutcome::into_outcome)
    }
}

/// Future returned by every callback.
pub type OutcomeFuture = BoxFuture<'static, Result<Option<Outcome>>>;

/// Ability callback or policy method: `(principal, args)`.
pub type AbilityFn<U> = Arc<dyn Fn(Option<Arc<U>>, Vec<Arg>) -> OutcomeFuture + Send + Sync>;

/// Before hook or policy `before`: `(principal, ability, args)`.
pub type BeforeFn<U> =
    Arc<dyn Fn(Option<Arc<U>>, String, Vec<Arg>) -> OutcomeFuture + Send + Sync>;

/// After hook: `(principal, ability, outcome so far, args)`.
pub type AfterFn<U> =
    Arc<dyn Fn(Option<Arc<U>>, String, Option<Outcome>, Vec<Arg>) -> OutcomeFuture + Send + Sync>;

/// Box an async closure as an [`AbilityFn`].
pub fn ability_fn<U, F, Fut, O>(f: F) -> AbilityFn<U>
where
    U: Send + Sync + 'static,
    F: Fn(Option<Arc<U>>, Vec<Arg>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    O: IntoOutcome,
{
    Arc::new(move |principal: Option<Arc<U>>, args: Vec<Arg>| {
        let fut = f(principal, args);
        async move { fut.await.into_outcome() }.boxed()
    })
}

/// Box an async closure as a [`BeforeFn`].
pub fn before_fn<U, F, Fut, O>(f: F) -> BeforeFn<U>
where
    U: Send + Sync + 'static,
    F: Fn(Option<Arc<U>>, String, Vec<Arg>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    O: IntoOutcome,
{
    Arc::new(
        move |principal: Option<Arc<U>>, ability: String, args: Vec<Arg>| {
            let fut = f(principal, ability, args);
            async move { fut.await.into_outcome() }.boxed()
        },
    )
}

/// Box an async closure as an [`AfterFn`].
pub fn after_fn<U, F, Fut, O>(f: F) -> AfterFn<U>
where
    U: Send + Sync + 'static,
    F: Fn(Option<Arc<U>>, String, Option<Outcome>, Vec<Arg>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    O: IntoOutcome,
{
    Arc::new(
        move |principal: Option<Arc<U>>,
              ability: String,
              outcome: Option<Outcome>,
              args: Vec<Arg>| {
            let fut = f(principal, ability, outcome, args);
            async move { fut.await.into_outcome() }.boxed()
        },
    )
}
