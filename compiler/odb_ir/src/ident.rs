//! Unresolved identifiers: a name plus optional sigil and scope marker.

use crate::Name;

/// Type sigil trailing an identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Annotation {
    #[default]
    None,
    /// `name$`
    String,
    /// `name#`
    Float,
}

impl Annotation {
    pub const fn sigil(self) -> Option<char> {
        match self {
            Annotation::None => None,
            Annotation::String => Some('$'),
            Annotation::Float => Some('#'),
        }
    }

    pub const fn from_sigil(c: char) -> Option<Self> {
        match c {
            '$' => Some(Annotation::String),
            '#' => Some(Annotation::Float),
            _ => None,
        }
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Annotation::None)
    }
}

/// Explicit `LOCAL` / `GLOBAL` qualifier on a declaration or reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeMarker {
    Local,
    Global,
}

/// Payload of an `Identifier` node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Identifier {
    pub name: Name,
    pub annotation: Annotation,
    pub scope: Option<ScopeMarker>,
}

impl Identifier {
    pub const fn new(name: Name, annotation: Annotation) -> Self {
        Identifier {
            name,
            annotation,
            scope: None,
        }
    }

    #[must_use]
    pub const fn with_scope(mut self, scope: ScopeMarker) -> Self {
        self.scope = Some(scope);
        self
    }
}
