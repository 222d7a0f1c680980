//! Ability names.

use std::borrow::Cow;

/// The policy method name for `ability`.
///
/// Hyphenated names are lower-cased, split on runs of `-`, `_` and
/// whitespace, and rejoined camel-style: `create-post` becomes `createPost`.
/// Names without a hyphen are used as-is, so `publish_post` stays
/// `publish_post`.
pub fn method_name(ability: &str) -> Cow<'_, str> {
    if !ability.contains('-') {
        return Cow::Borrowed(ability);
    }

    let lowered = ability.to_lowercase();
    let mut words = lowered.split(|c: char| c == '-' || c == '_' || c.is_whitespace());
    let mut method = String::with_capacity(lowered.len());
    if let Some(first) = words.next() {
        method.push_str(first);
    }
    for word in words {
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            method.extend(head.to_uppercase());
            method.push_str(chars.as_str());
        }
    }
    Cow::Owned(method)
}

/// One or more ability names for a single query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Abilities(Vec<String>);

impl Abilities {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Abilities {
    fn from(ability: &str) -> Self {
        Self(vec![ability.to_owned()])
    }
}

impl From<String> for Abilities {
    fn from(ability: String) -> Self {
        Self(vec![ability])
    }
}

impl From<&[&str]> for Abilities {
    fn from(abilities: &[&str]) -> Self {
        abilities.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for Abilities {
    fn from(abilities: [&str; N]) -> Self {
        abilities.into_iter().collect()
    }
}

impl From<Vec<&str>> for Abilities {
    fn from(abilities: Vec<&str>) -> Self {
        abilities.into_iter().collect()
    }
}

impl From<Vec<String>> for Abilities {
    fn from(abilities: Vec<String>) -> Self {
        Self(abilities)
    }
}

impl<S: Into<String>> FromIterator<S> for Abilities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
