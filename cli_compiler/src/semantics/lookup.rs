//! Qualified name lookup across scopes and included units

use super::graph::SemanticGraph;
use super::ids::*;
use super::nodes::IncludeTarget;
use std::collections::HashSet;

/// A possibly qualified name such as `::a::b` split into segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    /// Written with a leading `::`
    pub absolute: bool,
    pub segments: Vec<&'a str>,
}

impl<'a> QualifiedName<'a> {
    pub fn parse(name: &'a str) -> Self {
        let (absolute, rest) = match name.strip_prefix("::") {
            Some(rest) => (true, rest),
            None => (false, name),
        };

        Self {
            absolute,
            segments: rest.split("::").filter(|s| !s.is_empty()).collect(),
        }
    }
}

impl SemanticGraph {
    /// Find a node of `kind` named `name` as seen from `scope` in `unit`.
    ///
    /// The scope path is tried first in the unit itself and then in every
    /// `.cli` unit it includes, transitively and in inclusion order. When
    /// nothing matches, the innermost scope segment is dropped and the search
    /// repeats, down to the global scope. Absolute names are only searched
    /// from the global scope.
    pub fn lookup(
        &self,
        unit: UnitId,
        scope: &[String],
        name: &QualifiedName<'_>,
        kind: NameKind,
    ) -> Option<Nameable> {
        let Some((last, qualifiers)) = name.segments.split_last() else {
            return None;
        };

        let mut depth = if name.absolute { 0 } else { scope.len() };

        loop {
            let mut path: Vec<&str> = scope[..depth].iter().map(String::as_str).collect();
            path.extend_from_slice(qualifiers);

            let mut visited = HashSet::new();
            if let Some(found) = self.lookup_in_unit(unit, &path, last, kind, &mut visited) {
                return Some(found);
            }

            if depth == 0 {
                return None;
            }
            depth -= 1;
        }
    }

    pub fn lookup_class(&self, unit: UnitId, scope: &[String], name: &str) -> Option<ClassId> {
        match self.lookup(unit, scope, &QualifiedName::parse(name), NameKind::Class)? {
            Nameable::Class(id) => Some(id),
            _ => None,
        }
    }

    fn lookup_in_unit(
        &self,
        unit: UnitId,
        path: &[&str],
        last: &str,
        kind: NameKind,
        visited: &mut HashSet<UnitId>,
    ) -> Option<Nameable> {
        if !visited.insert(unit) {
            return None;
        }

        if let Some(found) = self.resolve_path(ScopeId::Unit(unit), path, last, kind) {
            return Some(found);
        }

        self.unit(unit)
            .includes
            .iter()
            .filter_map(|&edge| match self.includes_edge(edge).target {
                IncludeTarget::Cli(included) => Some(included),
                IncludeTarget::Cxx(_) => None,
            })
            .find_map(|included| self.lookup_in_unit(included, path, last, kind, visited))
    }

    /// Walk `path` down from `scope`, trying every child scope carrying each
    /// segment since namespaces may be reopened.
    fn resolve_path(
        &self,
        scope: ScopeId,
        path: &[&str],
        last: &str,
        kind: NameKind,
    ) -> Option<Nameable> {
        let scope_data = self.scope(scope);

        match path.split_first() {
            None => scope_data
                .find(last)
                .iter()
                .map(|&id| self.names_edge(id).target)
                .find(|target| target.kind() == kind),
            Some((head, rest)) => scope_data
                .find(head)
                .iter()
                .filter_map(|&id| self.names_edge(id).target.as_scope())
                .find_map(|child| self.resolve_path(child, rest, last, kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::PathKind;
    use crate::utils::{Location, Position};
    use std::path::{Path, PathBuf};

    fn loc() -> Location {
        Location::new(Path::new("test.cli"), Position::start())
    }

    fn scope(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| s.to_string()).collect()
    }

    struct Fixture {
        graph: SemanticGraph,
        unit: UnitId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut graph = SemanticGraph::new();
            let unit = graph.add_unit(PathBuf::from("test.cli"), loc());
            Self { graph, unit }
        }

        fn namespace(&mut self, parent: ScopeId, name: &str) -> ScopeId {
            let id = self.graph.add_namespace(loc());
            self.graph
                .add_names(parent, Nameable::Namespace(id), vec![name.into()], loc())
                .unwrap();
            ScopeId::Namespace(id)
        }

        fn include(&mut self, path: &str) -> UnitId {
            let other = self.graph.add_unit(PathBuf::from(path), loc());
            self.graph
                .add_includes(self.unit, IncludeTarget::Cli(other), path, PathKind::Quoted, loc());
            other
        }

        fn class(&mut self, parent: ScopeId, name: &str) -> ClassId {
            let id = self.graph.add_class(loc());
            self.graph
                .add_names(parent, Nameable::Class(id), vec![name.into()], loc())
                .unwrap();
            id
        }
    }

    #[test]
    fn test_parse_qualified_name() {
        let name = QualifiedName::parse("::a::b");
        assert!(name.absolute);
        assert_eq!(name.segments, vec!["a", "b"]);

        let name = QualifiedName::parse("c");
        assert!(!name.absolute);
        assert_eq!(name.segments, vec!["c"]);
    }

    #[test]
    fn test_lookup_falls_back_to_outer_scopes() {
        let mut f = Fixture::new();
        let global = ScopeId::Unit(f.unit);
        let base = f.class(global, "base");
        let outer = f.namespace(global, "outer");
        let _inner = f.namespace(outer, "inner");

        let found = f
            .graph
            .lookup_class(f.unit, &scope(&["outer", "inner"]), "base");
        assert_eq!(found, Some(base));
    }

    #[test]
    fn test_inner_declaration_shadows_outer() {
        let mut f = Fixture::new();
        let global = ScopeId::Unit(f.unit);
        let _outer_base = f.class(global, "base");
        let ns = f.namespace(global, "ns");
        let inner_base = f.class(ns, "base");

        assert_eq!(
            f.graph.lookup_class(f.unit, &scope(&["ns"]), "base"),
            Some(inner_base)
        );
    }

    #[test]
    fn test_absolute_name_skips_current_scope() {
        let mut f = Fixture::new();
        let global = ScopeId::Unit(f.unit);
        let ns = f.namespace(global, "ns");
        let _nested = f.class(ns, "base");

        assert_eq!(f.graph.lookup_class(f.unit, &scope(&["ns"]), "::base"), None);
        assert!(f
            .graph
            .lookup_class(f.unit, &scope(&["ns"]), "::ns::base")
            .is_some());
    }

    #[test]
    fn test_qualified_lookup_through_reopened_namespace() {
        let mut f = Fixture::new();
        let global = ScopeId::Unit(f.unit);
        let _first = f.namespace(global, "ns");
        let second = f.namespace(global, "ns");
        let class = f.class(second, "c");

        assert_eq!(f.graph.lookup_class(f.unit, &[], "ns::c"), Some(class));
    }

    #[test]
    fn test_kind_mismatch_is_not_found() {
        let mut f = Fixture::new();
        let global = ScopeId::Unit(f.unit);
        f.namespace(global, "thing");
        assert_eq!(f.graph.lookup_class(f.unit, &[], "thing"), None);
    }

    #[test]
    fn test_lookup_searches_included_units_and_survives_cycles() {
        let mut f = Fixture::new();
        let other = f.graph.add_unit(PathBuf::from("other.cli"), loc());
        let base = f.class(ScopeId::Unit(other), "base");

        f.graph
            .add_includes(f.unit, IncludeTarget::Cli(other), "other.cli", PathKind::Quoted, loc());
        f.graph
            .add_includes(other, IncludeTarget::Cli(f.unit), "test.cli", PathKind::Quoted, loc());

        assert_eq!(f.graph.lookup_class(f.unit, &[], "base"), Some(base));
        assert_eq!(f.graph.lookup_class(f.unit, &[], "missing"), None);
    }

    #[test]
    fn test_current_unit_wins_over_included_unit() {
        let mut f = Fixture::new();
        let other = f.include("other.cli");
        let _theirs = f.class(ScopeId::Unit(other), "base");
        let ours = f.class(ScopeId::Unit(f.unit), "base");

        assert_eq!(f.graph.lookup_class(f.unit, &[], "base"), Some(ours));
    }

    #[test]
    fn test_included_scope_is_searched_before_outer_scope() {
        let mut f = Fixture::new();
        let other = f.include("other.cli");
        let their_ns = f.namespace(ScopeId::Unit(other), "ns");
        let theirs = f.class(their_ns, "base");

        let global = ScopeId::Unit(f.unit);
        let _outer = f.class(global, "base");
        f.namespace(global, "ns");

        assert_eq!(f.graph.lookup_class(f.unit, &scope(&["ns"]), "base"), Some(theirs));
    }

    #[test]
    fn test_sibling_namespace_of_included_unit_is_not_visible() {
        let mut f = Fixture::new();
        let other = f.include("other.cli");
        let sibling = f.namespace(ScopeId::Unit(other), "sibling");
        let hidden = f.class(sibling, "hidden");
        f.namespace(ScopeId::Unit(f.unit), "ns");

        assert_eq!(f.graph.lookup_class(f.unit, &scope(&["ns"]), "hidden"), None);
        assert_eq!(
            f.graph.lookup_class(f.unit, &scope(&["ns"]), "sibling::hidden"),
            Some(hidden)
        );
    }
}
