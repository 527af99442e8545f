//! Nodes and edges of the semantic graph
//!
//! Nodes never point at each other directly; every relationship is an edge
//! stored in the arena and referenced by its typed index.

use super::ids::*;
use crate::tokens::PathKind;
use crate::utils::Location;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// SCOPES
// ============================================================================

/// Ordered naming edges of a scope plus a by-name index over them.
///
/// Both views are only modified together, so every edge in the list is
/// reachable under each of its names and nothing else is.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    names: Vec<NamesId>,
    index: HashMap<String, Vec<NamesId>>,
}

impl Scope {
    /// Naming edges in declaration order
    pub fn names(&self) -> &[NamesId] {
        &self.names
    }

    /// Naming edges that carry `name`, in declaration order
    pub fn find(&self, name: &str) -> &[NamesId] {
        self.index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn insert(&mut self, id: NamesId, names: &[String]) {
        self.names.push(id);
        for name in names {
            let entries = self.index.entry(name.clone()).or_default();
            if !entries.contains(&id) {
                entries.push(id);
            }
        }
    }

    pub(crate) fn remove(&mut self, id: NamesId, names: &[String]) -> bool {
        let Some(position) = self.names.iter().position(|n| *n == id) else {
            return false;
        };
        self.names.remove(position);

        for name in names {
            if let Some(entries) = self.index.get_mut(name) {
                entries.retain(|n| *n != id);
                if entries.is_empty() {
                    self.index.remove(name);
                }
            }
        }
        true
    }

    /// Whether the index and the ordered list describe the same edges
    pub(crate) fn is_consistent(&self) -> bool {
        self.index
            .values()
            .flatten()
            .all(|id| self.names.contains(id))
    }
}

// ============================================================================
// UNITS
// ============================================================================

/// One parsed specification file, which is also its global scope
#[derive(Debug, Clone)]
pub struct CliUnit {
    pub location: Location,
    /// Canonical path of the file
    pub path: PathBuf,
    pub scope: Scope,
    /// Interned types in creation order
    pub types: Vec<TypeId>,
    pub(crate) type_index: HashMap<String, TypeId>,
    pub includes: Vec<IncludesId>,
}

impl CliUnit {
    pub fn find_type(&self, spelling: &str) -> Option<TypeId> {
        self.type_index.get(spelling).copied()
    }
}

/// A C++ header included for its declarations; never parsed
#[derive(Debug, Clone)]
pub struct CxxUnit {
    pub location: Location,
    /// Path as written in the include directive
    pub path: String,
}

// ============================================================================
// NAMEABLE NODES
// ============================================================================

#[derive(Debug, Clone)]
pub struct NamespaceNode {
    pub location: Location,
    pub scope: Scope,
    pub(crate) named: Option<NamesId>,
}

impl NamespaceNode {
    pub fn named(&self) -> Option<NamesId> {
        self.named
    }
}

#[derive(Debug, Clone)]
pub struct ClassNode {
    pub location: Location,
    pub scope: Scope,
    pub inherits: Vec<InheritsId>,
    pub(crate) named: Option<NamesId>,
    pub(crate) abstract_specifier: Option<bool>,
}

impl ClassNode {
    pub fn named(&self) -> Option<NamesId> {
        self.named
    }

    pub fn is_abstract(&self) -> bool {
        self.abstract_specifier.unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct OptionNode {
    pub location: Location,
    pub belongs: Option<BelongsId>,
    pub initialized: Option<InitializedId>,
    /// Normalized documentation strings
    pub doc: Vec<String>,
    pub(crate) named: Option<NamesId>,
}

impl OptionNode {
    pub fn named(&self) -> Option<NamesId> {
        self.named
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.is_some()
    }
}

// ============================================================================
// TYPES AND EXPRESSIONS
// ============================================================================

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub location: Location,
    pub unit: UnitId,
    /// Canonical fundamental spelling or qualified user type name
    pub spelling: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    StringLit,
    CharLit,
    BoolLit,
    IntLit,
    FloatLit,
    Identifier,
    CallExpr,
}

impl ExpressionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionKind::StringLit => "string",
            ExpressionKind::CharLit => "char",
            ExpressionKind::BoolLit => "bool",
            ExpressionKind::IntLit => "int",
            ExpressionKind::FloatLit => "float",
            ExpressionKind::Identifier => "identifier",
            ExpressionKind::CallExpr => "call",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionNode {
    pub location: Location,
    pub kind: ExpressionKind,
    /// Source text, kept verbatim
    pub value: String,
}

// ============================================================================
// EDGES
// ============================================================================

/// Scope to nameable node, under one or more names
#[derive(Debug, Clone)]
pub struct NamesEdge {
    pub location: Location,
    pub scope: ScopeId,
    pub target: Nameable,
    /// Never empty; the first name is the primary one
    pub names: Vec<String>,
}

impl NamesEdge {
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct InheritsEdge {
    pub location: Location,
    pub derived: ClassId,
    pub base: ClassId,
}

#[derive(Debug, Clone)]
pub struct BelongsEdge {
    pub location: Location,
    pub option: OptionId,
    pub type_id: TypeId,
}

#[derive(Debug, Clone)]
pub struct InitializedEdge {
    pub location: Location,
    pub option: OptionId,
    pub expression: ExpressionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeTarget {
    Cli(UnitId),
    Cxx(CxxUnitId),
}

#[derive(Debug, Clone)]
pub struct IncludesEdge {
    pub location: Location,
    pub includer: UnitId,
    pub target: IncludeTarget,
    /// Path as written, without delimiters
    pub path: String,
    pub kind: PathKind,
}

impl IncludesEdge {
    /// The directive's path with its original delimiters
    pub fn spelling(&self) -> String {
        let (open, close) = self.kind.delimiters();
        format!("{}{}{}", open, self.path, close)
    }
}
