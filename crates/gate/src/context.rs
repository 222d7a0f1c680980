//! Ambient principal for the current task.
//!
//! A principal entered with [`run_scoped`] is visible to everything the body
//! awaits, across suspension points and worker threads, and to nothing else.
//! Nested scopes shadow the outer principal until they return. Tasks spawned
//! from inside a scope start without a principal; enter a scope in the spawned
//! task if it should act for the same principal.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

type Shared = Arc<dyn Any + Send + Sync>;

tokio::task_local! {
    static PRINCIPAL: Option<Shared>;
}

/// Run `body` with `principal` as the ambient principal.
pub async fn run_scoped<U, F>(principal: Option<U>, body: F) -> F::Output
where
    U: Send + Sync + 'static,
    F: Future,
{
    run_shared(principal.map(Arc::new), body).await
}

/// Like [`run_scoped`], for a principal that is already shared.
pub async fn run_shared<U, F>(principal: Option<Arc<U>>, body: F) -> F::Output
where
    U: Send + Sync + 'static,
    F: Future,
{
    PRINCIPAL.scope(principal.map(erase), body).await
}

/// Run a synchronous `body` with `principal` as the ambient principal.
pub fn sync_scoped<U, R>(principal: Option<U>, body: impl FnOnce() -> R) -> R
where
    U: Send + Sync + 'static,
{
    PRINCIPAL.sync_scope(principal.map(|p| erase(Arc::new(p))), body)
}

/// The ambient principal, or `None` outside any scope.
///
/// Also `None` when the principal in scope is not a `U`.
pub fn current_principal<U>() -> Option<Arc<U>>
where
    U: Send + Sync + 'static,
{
    PRINCIPAL
        .try_with(Clone::clone)
        .ok()
        .flatten()
        .and_then(|shared| shared.downcast::<U>().ok())
}

fn erase<U: Send + Sync + 'static>(principal: Arc<U>) -> Shared {
    principal
}
