//! Subject types and check arguments.

use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A named subject type, optionally derived from a parent type.
///
/// Kinds are declared as statics so that derived kinds can point at their
/// parent:
///
/// ```
/// use policy::SubjectKind;
///
/// static POST: SubjectKind = SubjectKind::new("Post");
/// static ARTICLE: SubjectKind = SubjectKind::extends("Article", &POST);
///
/// assert!(ARTICLE.is_a(&POST));
/// assert!(!POST.is_a(&ARTICLE));
/// ```
///
/// Names identify kinds: two kinds with the same name are the same kind.
pub struct SubjectKind {
    name: &'static str,
    parent: Option<&'static SubjectKind>,
}

impl SubjectKind {
    pub const fn new(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    pub const fn extends(name: &'static str, parent: &'static SubjectKind) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static SubjectKind> {
        self.parent
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'static SubjectKind> {
        std::iter::successors(self.parent, |kind| kind.parent)
    }

    /// Whether this kind is `other` or derives from it.
    pub fn is_a(&self, other: &SubjectKind) -> bool {
        self == other || self.ancestors().any(|ancestor| ancestor == other)
    }
}

impl PartialEq for SubjectKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SubjectKind {}

impl Hash for SubjectKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value a policy can be registered for.
pub trait Subject: Any + Send + Sync {
    /// The runtime kind of this value.
    fn kind(&self) -> &'static SubjectKind;
}

/// A shared subject instance with its kind captured at construction.
#[derive(Clone)]
pub struct SubjectRef {
    kind: &'static SubjectKind,
    value: Arc<dyn Any + Send + Sync>,
}

impl SubjectRef {
    pub fn kind(&self) -> &'static SubjectKind {
        self.kind
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl fmt::Debug for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectRef").field("kind", &self.kind).finish_non_exhaustive()
    }
}

/// An argument passed to an ability check.
#[derive(Debug, Clone)]
pub enum Arg {
    /// A subject instance.
    Subject(SubjectRef),
    /// A reference to a subject type rather than an instance.
    Type(&'static SubjectKind),
    /// Plain data.
    Value(Value),
}

impl Arg {
    pub fn subject<T: Subject>(value: T) -> Self {
        Self::shared(Arc::new(value))
    }

    pub fn shared<T: Subject>(value: Arc<T>) -> Self {
        Self::Subject(SubjectRef {
            kind: value.kind(),
            value,
        })
    }

    pub fn of_type(kind: &'static SubjectKind) -> Self {
        Self::Type(kind)
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// The subject kind this argument names, for instances and type references.
    pub fn kind(&self) -> Option<&'static SubjectKind> {
        match self {
            Self::Subject(subject) => Some(subject.kind()),
            Self::Type(kind) => Some(*kind),
            Self::Value(_) => None,
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type(_))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Subject(subject) => subject.downcast_ref(),
            Self::Type(_) | Self::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Subject(_) | Self::Type(_) => None,
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&'static SubjectKind> for Arg {
    fn from(kind: &'static SubjectKind) -> Self {
        Self::Type(kind)
    }
}
