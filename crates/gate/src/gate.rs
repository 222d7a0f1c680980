//! Ability resolution.

use crate::ability::{Abilities, method_name};
use crate::{Error, GateConfig, Result, context};
use policy::{
    AbilityFn, AfterFn, Arg, BeforeFn, IntoOutcome, Outcome, Policy, PolicyRegistry, Response,
    SubjectKind, ability_fn, after_fn, before_fn,
};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, trace};

/// Decides whether the ambient principal may perform an ability.
///
/// A check runs the before hooks, then the policy method or ability callback,
/// then the after hooks. The first hook that decides short-circuits the
/// before hooks and the callback; after hooks only run while the outcome is
/// still undecided.
///
/// Registration takes `&mut self` and is expected to finish before checks
/// start; a built gate is shared behind an `Arc`.
pub struct Gate<U> {
    abilities: HashMap<String, AbilityFn<U>>,
    before: Vec<BeforeFn<U>>,
    after: Vec<AfterFn<U>>,
    policies: PolicyRegistry<U>,
    config: GateConfig,
}

impl<U: Send + Sync + 'static> Gate<U> {
    pub fn new() -> Self {
        Self {
            abilities: HashMap::new(),
            before: Vec::new(),
            after: Vec::new(),
            policies: PolicyRegistry::new(),
            config: GateConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `policies` as the policy registry.
    pub fn with_policies(mut self, policies: PolicyRegistry<U>) -> Self {
        self.policies = policies;
        self
    }

    /// Register a policy for subjects of `kind`.
    pub fn policy(&mut self, kind: &'static SubjectKind, policy: impl Policy<U> + 'static) -> &mut Self {
        self.policies.register(kind, Arc::new(policy));
        self
    }

    /// Define the callback for `ability`, replacing any earlier one.
    pub fn define<F, Fut, O>(&mut self, ability: impl Into<String>, callback: F) -> Result<&mut Self>
    where
        F: Fn(Option<Arc<U>>, Vec<Arg>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoOutcome,
    {
        let ability = ability.into();
        if ability.is_empty() {
            return Err(Error::InvalidAbility(ability));
        }
        debug!(%ability, "defining ability");
        self.abilities.insert(ability, ability_fn(callback));
        Ok(self)
    }

    /// Add a hook that runs before every check.
    pub fn before<F, Fut, O>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(Option<Arc<U>>, String, Vec<Arg>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoOutcome,
    {
        self.before.push(before_fn(hook));
        self
    }

    /// Add a hook that runs after every check still undecided.
    pub fn after<F, Fut, O>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(Option<Arc<U>>, String, Option<Outcome>, Vec<Arg>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoOutcome,
    {
        self.after.push(after_fn(hook));
        self
    }

    /// Whether every ability has a defined callback.
    ///
    /// Only defined abilities count; an ability answered by a policy method
    /// is not reported here.
    pub fn has(&self, abilities: impl Into<Abilities>) -> bool {
        let abilities: Abilities = abilities.into();
        abilities
            .iter()
            .all(|ability| self.abilities.contains_key(ability))
    }

    /// Names of the defined abilities, in no particular order.
    pub fn abilities(&self) -> impl Iterator<Item = &str> {
        self.abilities.keys().map(String::as_str)
    }

    pub fn policies(&self) -> &PolicyRegistry<U> {
        &self.policies
    }

    pub fn policy_for(&self, subject: &Arg) -> Option<Arc<dyn Policy<U>>> {
        self.policies.policy_for(subject)
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Whether every ability is allowed.
    pub async fn allows(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        self.check(abilities, args).await
    }

    pub async fn denies(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        Ok(!self.allows(abilities, args).await?)
    }

    /// Whether every ability is allowed, stopping at the first denial.
    pub async fn check(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        let abilities: Abilities = abilities.into();
        for ability in abilities.iter() {
            if self.inspect(ability, args).await?.denied() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether any ability is allowed, stopping at the first allow.
    pub async fn any(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        let abilities: Abilities = abilities.into();
        for ability in abilities.iter() {
            if self.inspect(ability, args).await?.allowed() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub async fn none(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        Ok(!self.any(abilities, args).await?)
    }

    /// The allowing response, or [`policy::Error::Denied`] carrying the denial.
    pub async fn authorize(&self, ability: &str, args: &[Arg]) -> Result<Response> {
        Ok(self.inspect(ability, args).await?.authorize()?)
    }

    /// The check's outcome as a response.
    ///
    /// Responses from callbacks are returned untouched; `true` becomes an
    /// allow, and `false` or an undecided outcome the configured denial.
    pub async fn inspect(&self, ability: &str, args: &[Arg]) -> Result<Response> {
        let response = match self.raw(ability, args).await? {
            Some(Outcome::Response(response)) => response,
            Some(Outcome::Bool(true)) => Response::allow(),
            Some(Outcome::Bool(false)) | None => self.config.denial(),
        };
        Ok(response)
    }

    /// The check's outcome as produced by hooks and callbacks.
    pub async fn raw(&self, ability: &str, args: &[Arg]) -> Result<Option<Outcome>> {
        let principal = context::current_principal::<U>();

        let mut result = None;
        for hook in &self.before {
            result = hook(principal.clone(), ability.to_owned(), args.to_vec()).await?;
            if result.is_some() {
                trace!(ability, "before hook decided");
                break;
            }
        }

        if result.is_none() {
            result = self.resolve(principal.clone(), ability, args).await?;
        }

        for hook in &self.after {
            if result.is_some() {
                break;
            }
            result = hook(principal.clone(), ability.to_owned(), result.clone(), args.to_vec()).await?;
        }

        debug!(ability, outcome = ?result, "resolved ability");
        Ok(result)
    }

    async fn resolve(
        &self,
        principal: Option<Arc<U>>,
        ability: &str,
        args: &[Arg],
    ) -> Result<Option<Outcome>> {
        if let Some(subject) = args.first() {
            if let Some(policy) = self.policies.policy_for(subject) {
                let method = method_name(ability);
                if let Some(callback) = policy.method_for(&method) {
                    trace!(ability, %method, "resolving through policy");
                    if let Some(before) = policy.before() {
                        let decided = before(principal.clone(), ability.to_owned(), args.to_vec()).await?;
                        if decided.is_some() {
                            trace!(ability, "policy before decided");
                            return Ok(decided);
                        }
                    }

                    // Type references only select the policy.
                    let args = if subject.is_type() {
                        args[1..].to_vec()
                    } else {
                        args.to_vec()
                    };
                    return Ok(callback(principal, args).await?);
                }
            }
        }

        match self.abilities.get(ability) {
            Some(callback) => Ok(callback(principal, args.to_vec()).await?),
            None => {
                trace!(ability, "no callback for ability");
                Ok(None)
            }
        }
    }

    /// A view of this gate that checks as `principal`.
    pub fn for_user(&self, principal: Option<U>) -> ForUser<'_, U> {
        self.for_shared_user(principal.map(Arc::new))
    }

    pub fn for_shared_user(&self, principal: Option<Arc<U>>) -> ForUser<'_, U> {
        ForUser {
            gate: self,
            principal,
        }
    }
}

impl<U: Send + Sync + 'static> Default for Gate<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for Gate<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut abilities: Vec<_> = self.abilities.keys().collect();
        abilities.sort();
        f.debug_struct("Gate")
            .field("abilities", &abilities)
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .field("policies", &self.policies)
            .field("config", &self.config)
            .finish()
    }
}

/// A gate bound to an explicit principal.
///
/// Every query enters a fresh ambient scope for the principal, whatever scope
/// the caller is in.
pub struct ForUser<'a, U> {
    gate: &'a Gate<U>,
    principal: Option<Arc<U>>,
}

impl<U: Send + Sync + 'static> ForUser<'_, U> {
    pub fn principal(&self) -> Option<&Arc<U>> {
        self.principal.as_ref()
    }

    pub async fn allows(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        self.scoped(self.gate.allows(abilities, args)).await
    }

    pub async fn denies(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        self.scoped(self.gate.denies(abilities, args)).await
    }

    pub async fn check(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        self.scoped(self.gate.check(abilities, args)).await
    }

    pub async fn any(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        self.scoped(self.gate.any(abilities, args)).await
    }

    pub async fn none(&self, abilities: impl Into<Abilities>, args: &[Arg]) -> Result<bool> {
        self.scoped(self.gate.none(abilities, args)).await
    }

    pub async fn authorize(&self, ability: &str, args: &[Arg]) -> Result<Response> {
        self.scoped(self.gate.authorize(ability, args)).await
    }

    pub async fn inspect(&self, ability: &str, args: &[Arg]) -> Result<Response> {
        self.scoped(self.gate.inspect(ability, args)).await
    }

    pub async fn raw(&self, ability: &str, args: &[Arg]) -> Result<Option<Outcome>> {
        self.scoped(self.gate.raw(ability, args)).await
    }

    async fn scoped<F: Future>(&self, body: F) -> F::Output {
        context::run_shared(self.principal.clone(), body).await
    }
}
