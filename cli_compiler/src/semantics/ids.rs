//! Typed indices into the semantic graph arena

use std::fmt;

macro_rules! arena_id {
    ($($(#[$meta:meta])* $name:ident => $label:literal),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(usize);

            impl $name {
                pub(crate) fn new(index: usize) -> Self {
                    Self(index)
                }

                pub fn index(self) -> usize {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{} #{}", $label, self.0)
                }
            }
        )+
    };
}

arena_id! {
    /// A parsed specification file
    UnitId => "unit",
    /// An opaque C++ header
    CxxUnitId => "c++ unit",
    NamespaceId => "namespace",
    ClassId => "class",
    OptionId => "option",
    TypeId => "type",
    ExpressionId => "expression",
    NamesId => "names edge",
    InheritsId => "inherits edge",
    BelongsId => "belongs edge",
    InitializedId => "initialized edge",
    IncludesId => "includes edge",
}

/// Any node that owns named children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeId {
    Unit(UnitId),
    Namespace(NamespaceId),
    Class(ClassId),
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeId::Unit(id) => id.fmt(f),
            ScopeId::Namespace(id) => id.fmt(f),
            ScopeId::Class(id) => id.fmt(f),
        }
    }
}

/// Any node that is the target of a naming edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nameable {
    Namespace(NamespaceId),
    Class(ClassId),
    Option(OptionId),
}

impl Nameable {
    /// The scope this node opens, if it is a scope
    pub fn as_scope(self) -> Option<ScopeId> {
        match self {
            Nameable::Namespace(id) => Some(ScopeId::Namespace(id)),
            Nameable::Class(id) => Some(ScopeId::Class(id)),
            Nameable::Option(_) => None,
        }
    }

    pub fn kind(self) -> NameKind {
        match self {
            Nameable::Namespace(_) => NameKind::Namespace,
            Nameable::Class(_) => NameKind::Class,
            Nameable::Option(_) => NameKind::Option,
        }
    }
}

impl fmt::Display for Nameable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nameable::Namespace(id) => id.fmt(f),
            Nameable::Class(id) => id.fmt(f),
            Nameable::Option(id) => id.fmt(f),
        }
    }
}

/// Kind of node requested from a name lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Namespace,
    Class,
    Option,
}

impl NameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKind::Namespace => "namespace",
            NameKind::Class => "class",
            NameKind::Option => "option",
        }
    }
}
