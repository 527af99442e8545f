//! Arena owning every node and edge produced by one compilation

use super::error::{SemanticError, SemanticResult};
use super::ids::*;
use super::nodes::*;
use crate::tokens::PathKind;
use crate::utils::Location;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct SemanticGraph {
    units: Vec<CliUnit>,
    cxx_units: Vec<CxxUnit>,
    namespaces: Vec<NamespaceNode>,
    classes: Vec<ClassNode>,
    options: Vec<OptionNode>,
    types: Vec<TypeNode>,
    expressions: Vec<ExpressionNode>,
    names: Vec<NamesEdge>,
    inherits: Vec<InheritsEdge>,
    belongs: Vec<BelongsEdge>,
    initialized: Vec<InitializedEdge>,
    includes: Vec<IncludesEdge>,
}

/// Indexed accessors; an id always comes from the graph that issued it.
macro_rules! accessors {
    ($($field:ident: $id:ty => $node:ty, $get:ident, $get_mut:ident;)+) => {
        $(
            pub fn $get(&self, id: $id) -> &$node {
                &self.$field[id.index()]
            }

            #[allow(dead_code)]
            pub(crate) fn $get_mut(&mut self, id: $id) -> &mut $node {
                &mut self.$field[id.index()]
            }
        )+
    };
}

impl SemanticGraph {
    pub fn new() -> Self {
        Self::default()
    }

    accessors! {
        units: UnitId => CliUnit, unit, unit_mut;
        cxx_units: CxxUnitId => CxxUnit, cxx_unit, cxx_unit_mut;
        namespaces: NamespaceId => NamespaceNode, namespace, namespace_mut;
        classes: ClassId => ClassNode, class, class_mut;
        options: OptionId => OptionNode, option, option_mut;
        types: TypeId => TypeNode, type_node, type_node_mut;
        expressions: ExpressionId => ExpressionNode, expression, expression_mut;
        names: NamesId => NamesEdge, names_edge, names_edge_mut;
        inherits: InheritsId => InheritsEdge, inherits_edge, inherits_edge_mut;
        belongs: BelongsId => BelongsEdge, belongs_edge, belongs_edge_mut;
        initialized: InitializedId => InitializedEdge, initialized_edge, initialized_edge_mut;
        includes: IncludesId => IncludesEdge, includes_edge, includes_edge_mut;
    }

    // ========================================================================
    // NODE CREATION
    // ========================================================================

    pub fn add_unit(&mut self, path: PathBuf, location: Location) -> UnitId {
        let id = UnitId::new(self.units.len());
        self.units.push(CliUnit {
            location,
            path,
            scope: Scope::default(),
            types: Vec::new(),
            type_index: HashMap::new(),
            includes: Vec::new(),
        });
        id
    }

    pub fn add_cxx_unit(&mut self, path: &str, location: Location) -> CxxUnitId {
        let id = CxxUnitId::new(self.cxx_units.len());
        self.cxx_units.push(CxxUnit {
            location,
            path: path.to_string(),
        });
        id
    }

    pub fn add_namespace(&mut self, location: Location) -> NamespaceId {
        let id = NamespaceId::new(self.namespaces.len());
        self.namespaces.push(NamespaceNode {
            location,
            scope: Scope::default(),
            named: None,
        });
        id
    }

    pub fn add_class(&mut self, location: Location) -> ClassId {
        let id = ClassId::new(self.classes.len());
        self.classes.push(ClassNode {
            location,
            scope: Scope::default(),
            inherits: Vec::new(),
            named: None,
            abstract_specifier: None,
        });
        id
    }

    pub fn add_option(&mut self, location: Location) -> OptionId {
        let id = OptionId::new(self.options.len());
        self.options.push(OptionNode {
            location,
            belongs: None,
            initialized: None,
            doc: Vec::new(),
            named: None,
        });
        id
    }

    pub fn add_expression(
        &mut self,
        kind: ExpressionKind,
        value: String,
        location: Location,
    ) -> ExpressionId {
        let id = ExpressionId::new(self.expressions.len());
        self.expressions.push(ExpressionNode {
            location,
            kind,
            value,
        });
        id
    }

    /// Return the unit's type with this exact spelling, creating it on first use
    pub fn intern_type(&mut self, unit: UnitId, spelling: &str, location: Location) -> TypeId {
        if let Some(existing) = self.unit(unit).find_type(spelling) {
            return existing;
        }

        let id = TypeId::new(self.types.len());
        self.types.push(TypeNode {
            location,
            unit,
            spelling: spelling.to_string(),
        });

        let unit = self.unit_mut(unit);
        unit.types.push(id);
        unit.type_index.insert(spelling.to_string(), id);
        id
    }

    // ========================================================================
    // EDGE CREATION
    // ========================================================================

    /// Name `target` inside `scope`. A nameable node accepts exactly one
    /// naming edge over its lifetime.
    pub fn add_names(
        &mut self,
        scope: ScopeId,
        target: Nameable,
        names: Vec<String>,
        location: Location,
    ) -> SemanticResult<NamesId> {
        if self.named(target).is_some() {
            return Err(SemanticError::NameAlreadyAssigned { target });
        }

        let id = NamesId::new(self.names.len());
        self.scope_mut(scope).insert(id, &names);
        self.names.push(NamesEdge {
            location,
            scope,
            target,
            names,
        });

        match target {
            Nameable::Namespace(n) => self.namespace_mut(n).named = Some(id),
            Nameable::Class(c) => self.class_mut(c).named = Some(id),
            Nameable::Option(o) => self.option_mut(o).named = Some(id),
        }

        Ok(id)
    }

    /// Detach a naming edge from its scope. The edge stays in the arena and
    /// its target keeps its name.
    pub fn remove_names(&mut self, id: NamesId) -> bool {
        let edge = &self.names[id.index()];
        let (scope, names) = (edge.scope, edge.names.clone());
        self.scope_mut(scope).remove(id, &names)
    }

    /// Duplicate bases are kept as separate edges
    pub fn add_inherits(&mut self, derived: ClassId, base: ClassId, location: Location) -> InheritsId {
        let id = InheritsId::new(self.inherits.len());
        self.inherits.push(InheritsEdge {
            location,
            derived,
            base,
        });
        self.class_mut(derived).inherits.push(id);
        id
    }

    pub fn set_belongs(&mut self, option: OptionId, type_id: TypeId, location: Location) -> BelongsId {
        let id = BelongsId::new(self.belongs.len());
        self.belongs.push(BelongsEdge {
            location,
            option,
            type_id,
        });
        self.option_mut(option).belongs = Some(id);
        id
    }

    pub fn set_initialized(
        &mut self,
        option: OptionId,
        expression: ExpressionId,
        location: Location,
    ) -> InitializedId {
        let id = InitializedId::new(self.initialized.len());
        self.initialized.push(InitializedEdge {
            location,
            option,
            expression,
        });
        self.option_mut(option).initialized = Some(id);
        id
    }

    pub fn add_includes(
        &mut self,
        includer: UnitId,
        target: IncludeTarget,
        path: &str,
        kind: PathKind,
        location: Location,
    ) -> IncludesId {
        let id = IncludesId::new(self.includes.len());
        self.includes.push(IncludesEdge {
            location,
            includer,
            target,
            path: path.to_string(),
            kind,
        });
        self.unit_mut(includer).includes.push(id);
        id
    }

    pub fn set_abstract(&mut self, class: ClassId, value: bool) -> SemanticResult<()> {
        let node = self.class_mut(class);
        if node.abstract_specifier.is_some() {
            return Err(SemanticError::AbstractAlreadySet { class });
        }
        node.abstract_specifier = Some(value);
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn scope(&self, id: ScopeId) -> &Scope {
        match id {
            ScopeId::Unit(u) => &self.unit(u).scope,
            ScopeId::Namespace(n) => &self.namespace(n).scope,
            ScopeId::Class(c) => &self.class(c).scope,
        }
    }

    fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        match id {
            ScopeId::Unit(u) => &mut self.unit_mut(u).scope,
            ScopeId::Namespace(n) => &mut self.namespace_mut(n).scope,
            ScopeId::Class(c) => &mut self.class_mut(c).scope,
        }
    }

    pub fn named(&self, target: Nameable) -> Option<NamesId> {
        match target {
            Nameable::Namespace(n) => self.namespace(n).named(),
            Nameable::Class(c) => self.class(c).named(),
            Nameable::Option(o) => self.option(o).named(),
        }
    }

    /// Primary name of a nameable node
    pub fn name_of(&self, target: Nameable) -> Option<&str> {
        self.named(target).map(|id| self.names_edge(id).name())
    }

    /// All names (aliases) of a nameable node
    pub fn names_of(&self, target: Nameable) -> &[String] {
        self.named(target)
            .map(|id| self.names_edge(id).names.as_slice())
            .unwrap_or(&[])
    }

    pub fn option_type(&self, option: OptionId) -> Option<&TypeNode> {
        self.option(option)
            .belongs
            .map(|b| self.type_node(self.belongs_edge(b).type_id))
    }

    pub fn initializer(&self, option: OptionId) -> Option<&ExpressionNode> {
        self.option(option)
            .initialized
            .map(|i| self.expression(self.initialized_edge(i).expression))
    }

    /// Base classes in declaration order
    pub fn bases(&self, class: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.class(class)
            .inherits
            .iter()
            .map(|&i| self.inherits_edge(i).base)
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn cxx_unit_count(&self) -> usize {
        self.cxx_units.len()
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn expression_count(&self) -> usize {
        self.expressions.len()
    }

    pub fn units(&self) -> impl Iterator<Item = UnitId> {
        (0..self.units.len()).map(UnitId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;
    use assert_matches::assert_matches;
    use std::path::Path;

    fn loc() -> Location {
        Location::new(Path::new("test.cli"), Position::start())
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_naming_edge_is_assigned_once() {
        let mut graph = SemanticGraph::new();
        let unit = graph.add_unit(PathBuf::from("test.cli"), loc());
        let class = graph.add_class(loc());

        graph
            .add_names(ScopeId::Unit(unit), Nameable::Class(class), strings(&["c"]), loc())
            .unwrap();
        let second = graph.add_names(
            ScopeId::Unit(unit),
            Nameable::Class(class),
            strings(&["d"]),
            loc(),
        );

        assert_matches!(second, Err(SemanticError::NameAlreadyAssigned { .. }));
        assert_eq!(graph.name_of(Nameable::Class(class)), Some("c"));
        assert_eq!(graph.scope(ScopeId::Unit(unit)).len(), 1);
    }

    #[test]
    fn test_abstract_is_set_once() {
        let mut graph = SemanticGraph::new();
        let class = graph.add_class(loc());
        assert!(!graph.class(class).is_abstract());
        graph.set_abstract(class, true).unwrap();
        assert!(graph.class(class).is_abstract());
        assert_matches!(
            graph.set_abstract(class, false),
            Err(SemanticError::AbstractAlreadySet { .. })
        );
    }

    #[test]
    fn test_types_are_interned_per_unit() {
        let mut graph = SemanticGraph::new();
        let a = graph.add_unit(PathBuf::from("a.cli"), loc());
        let b = graph.add_unit(PathBuf::from("b.cli"), loc());

        let t1 = graph.intern_type(a, "int", loc());
        let t2 = graph.intern_type(a, "int", loc());
        let t3 = graph.intern_type(b, "int", loc());

        assert_eq!(t1, t2);
        assert_ne!(t1, t3);
        assert_eq!(graph.unit(a).types.len(), 1);
        assert_eq!(graph.type_count(), 2);
    }

    #[test]
    fn test_option_edges() {
        let mut graph = SemanticGraph::new();
        let unit = graph.add_unit(PathBuf::from("a.cli"), loc());
        let class = graph.add_class(loc());
        let option = graph.add_option(loc());
        graph
            .add_names(
                ScopeId::Class(class),
                Nameable::Option(option),
                strings(&["--level", "-l"]),
                loc(),
            )
            .unwrap();

        let ty = graph.intern_type(unit, "int", loc());
        graph.set_belongs(option, ty, loc());
        assert!(!graph.option(option).is_initialized());

        let expr = graph.add_expression(ExpressionKind::IntLit, "5".into(), loc());
        graph.set_initialized(option, expr, loc());

        assert_eq!(graph.option_type(option).unwrap().spelling, "int");
        assert_eq!(graph.initializer(option).unwrap().value, "5");
        assert_eq!(graph.names_of(Nameable::Option(option)), &strings(&["--level", "-l"])[..]);
        assert_eq!(graph.scope(ScopeId::Class(class)).find("-l").len(), 1);
    }

    #[test]
    fn test_remove_names_detaches_from_scope() {
        let mut graph = SemanticGraph::new();
        let unit = graph.add_unit(PathBuf::from("a.cli"), loc());
        let ns = graph.add_namespace(loc());
        let id = graph
            .add_names(ScopeId::Unit(unit), Nameable::Namespace(ns), strings(&["n"]), loc())
            .unwrap();

        assert!(graph.remove_names(id));
        let scope = graph.scope(ScopeId::Unit(unit));
        assert!(scope.is_empty());
        assert!(scope.find("n").is_empty());
        assert!(scope.is_consistent());
    }

    #[test]
    fn test_duplicate_bases_are_kept() {
        let mut graph = SemanticGraph::new();
        let base = graph.add_class(loc());
        let derived = graph.add_class(loc());
        graph.add_inherits(derived, base, loc());
        graph.add_inherits(derived, base, loc());
        assert_eq!(graph.bases(derived).collect::<Vec<_>>(), vec![base, base]);
    }
}
