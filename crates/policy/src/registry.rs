//! Policy lookup by subject type.

use crate::{Arg, Policy, SubjectKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

struct Entry<U> {
    kind: &'static SubjectKind,
    policy: Arc<dyn Policy<U>>,
}

/// Maps subject types to their policies.
///
/// Lookup prefers a policy registered for the subject's exact kind and falls
/// back to any policy registered for one of its ancestors. When several
/// ancestors have policies, which one answers is unspecified: the fallback
/// scan follows the map's iteration order.
pub struct PolicyRegistry<U> {
    entries: HashMap<&'static str, Entry<U>>,
}

impl<U> PolicyRegistry<U> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `policy` for subjects of `kind`.
    ///
    /// A later registration for the same kind replaces the earlier one.
    pub fn register(&mut self, kind: &'static SubjectKind, policy: Arc<dyn Policy<U>>) {
        let previous = self.entries.insert(kind.name(), Entry { kind, policy });
        if previous.is_some() {
            warn!(kind = kind.name(), "replacing policy registration");
        }
    }

    /// The policy for an argument naming a subject instance or type.
    pub fn policy_for(&self, subject: &Arg) -> Option<Arc<dyn Policy<U>>> {
        self.policy_for_kind(subject.kind()?)
    }

    /// The policy for subjects of `kind`: exact match first, then ancestors.
    pub fn policy_for_kind(&self, kind: &SubjectKind) -> Option<Arc<dyn Policy<U>>> {
        if let Some(entry) = self.entries.get(kind.name()) {
            return Some(Arc::clone(&entry.policy));
        }

        self.entries
            .values()
            .find(|entry| kind.is_a(entry.kind))
            .map(|entry| Arc::clone(&entry.policy))
    }

    /// Registered kinds, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static SubjectKind> {
        self.entries.values().map(|entry| entry.kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<U> Default for PolicyRegistry<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> FromIterator<(&'static SubjectKind, Arc<dyn Policy<U>>)> for PolicyRegistry<U> {
    fn from_iter<I: IntoIterator<Item = (&'static SubjectKind, Arc<dyn Policy<U>>)>>(
        iter: I,
    ) -> Self {
        let mut registry = Self::new();
        for (kind, policy) in iter {
            registry.register(kind, policy);
        }
        registry
    }
}

impl<U> fmt::Debug for PolicyRegistry<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Outcome, PolicyTable, Subject};

    static POST: SubjectKind = SubjectKind::new("Post");
    static ARTICLE: SubjectKind = SubjectKind::extends("Article", &POST);
    static FEATURE: SubjectKind = SubjectKind::extends("Feature", &ARTICLE);
    static COMMENT: SubjectKind = SubjectKind::new("Comment");

    struct Article;

    impl Subject for Article {
        fn kind(&self) -> &'static SubjectKind {
            &ARTICLE
        }
    }

    fn tagged(tag: &'static str) -> Arc<dyn Policy<()>> {
        Arc::new(PolicyTable::new().with_method("tag", move |_: Option<Arc<()>>, _: Vec<Arg>| {
            async move { crate::Response::allow().with_message(tag) }
        }))
    }

    async fn tag_of(policy: Arc<dyn Policy<()>>) -> String {
        let method = policy.method_for("tag").unwrap();
        match method(None, Vec::new()).await.unwrap() {
            Some(Outcome::Response(response)) => response.message().unwrap().to_owned(),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn exact_match_wins_over_ancestor() {
        let registry: PolicyRegistry<()> =
            [(&POST, tagged("post")), (&ARTICLE, tagged("article"))].into_iter().collect();

        let policy = registry.policy_for(&Arg::subject(Article)).unwrap();
        assert_eq!(tag_of(policy).await, "article");
    }

    #[tokio::test]
    async fn falls_back_to_ancestor() {
        let mut registry = PolicyRegistry::new();
        registry.register(&POST, tagged("post"));

        let policy = registry.policy_for(&Arg::subject(Article)).unwrap();
        assert_eq!(tag_of(policy).await, "post");

        let policy = registry.policy_for(&Arg::of_type(&ARTICLE)).unwrap();
        assert_eq!(tag_of(policy).await, "post");
    }

    #[test]
    fn unrelated_and_plain_values_have_no_policy() {
        let mut registry = PolicyRegistry::new();
        registry.register(&POST, tagged("post"));

        assert!(registry.policy_for(&Arg::of_type(&COMMENT)).is_none());
        assert!(registry.policy_for(&Arg::value(1)).is_none());
    }

    #[tokio::test]
    async fn later_registration_replaces_earlier() {
        let mut registry = PolicyRegistry::new();
        registry.register(&POST, tagged("first"));
        registry.register(&POST, tagged("second"));

        assert_eq!(registry.len(), 1);
        let policy = registry.policy_for_kind(&POST).unwrap();
        assert_eq!(tag_of(policy).await, "second");
    }

    #[tokio::test]
    async fn several_matching_ancestors_pick_one_of_them() {
        let registry: PolicyRegistry<()> =
            [(&POST, tagged("post")), (&ARTICLE, tagged("article"))].into_iter().collect();

        let policy = registry.policy_for(&Arg::of_type(&FEATURE)).unwrap();
        let tag = tag_of(policy).await;
        assert!(tag == "post" || tag == "article", "unexpected policy {tag}");
    }

    #[test]
    fn kinds_lists_registrations() {
        let registry: PolicyRegistry<()> =
            [(&POST, tagged("post")), (&COMMENT, tagged("comment"))].into_iter().collect();

        let mut names: Vec<_> = registry.kinds().map(SubjectKind::name).collect();
        names.sort_unstable();
        assert_eq!(names, ["Comment", "Post"]);
        assert!(!registry.is_empty());
        assert!(PolicyRegistry::<()>::new().kinds().next().is_none());
    }
}
