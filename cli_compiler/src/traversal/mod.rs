//! Read-only traversal of a parsed semantic graph
//!
//! A `GraphVisitor` receives hooks as the `walk_*` functions descend from a
//! unit through its scopes. Scopes are visited in declaration order, classes
//! report their inheritance edges before their options, and each option
//! reports its type and then its initializer.

pub mod outline;

use crate::semantics::{
    ClassId, ExpressionId, IncludesId, InheritsId, Nameable, NamespaceId, OptionId, ScopeId,
    SemanticGraph, TypeId, UnitId,
};

pub use outline::{render_outline, OutlineWriter};

/// Hooks called by the `walk_*` functions. Every hook defaults to doing
/// nothing; an error stops the walk and is returned to the caller.
pub trait GraphVisitor {
    type Error;

    fn enter_unit(&mut self, _graph: &SemanticGraph, _unit: UnitId) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_unit(&mut self, _graph: &SemanticGraph, _unit: UnitId) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_includes(
        &mut self,
        _graph: &SemanticGraph,
        _edge: IncludesId,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_namespace(
        &mut self,
        _graph: &SemanticGraph,
        _namespace: NamespaceId,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_namespace(
        &mut self,
        _graph: &SemanticGraph,
        _namespace: NamespaceId,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_class(&mut self, _graph: &SemanticGraph, _class: ClassId) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_class(&mut self, _graph: &SemanticGraph, _class: ClassId) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_inherits(
        &mut self,
        _graph: &SemanticGraph,
        _edge: InheritsId,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_option(
        &mut self,
        _graph: &SemanticGraph,
        _option: OptionId,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_type(
        &mut self,
        _graph: &SemanticGraph,
        _option: OptionId,
        _type_id: TypeId,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_expression(
        &mut self,
        _graph: &SemanticGraph,
        _option: OptionId,
        _expression: ExpressionId,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk one unit: its inclusion edges, then its global scope.
/// Included units are not entered; walk them separately if needed.
pub fn walk_unit<V>(visitor: &mut V, graph: &SemanticGraph, unit: UnitId) -> Result<(), V::Error>
where
    V: GraphVisitor + ?Sized,
{
    visitor.enter_unit(graph, unit)?;

    for &edge in &graph.unit(unit).includes {
        visitor.visit_includes(graph, edge)?;
    }

    walk_scope(visitor, graph, ScopeId::Unit(unit))?;
    visitor.exit_unit(graph, unit)
}

/// Walk every unit in the graph in creation order (root first)
pub fn walk_graph<V>(visitor: &mut V, graph: &SemanticGraph) -> Result<(), V::Error>
where
    V: GraphVisitor + ?Sized,
{
    for unit in graph.units() {
        walk_unit(visitor, graph, unit)?;
    }
    Ok(())
}

pub fn walk_scope<V>(visitor: &mut V, graph: &SemanticGraph, scope: ScopeId) -> Result<(), V::Error>
where
    V: GraphVisitor + ?Sized,
{
    for &names in graph.scope(scope).names() {
        match graph.names_edge(names).target {
            Nameable::Namespace(namespace) => walk_namespace(visitor, graph, namespace)?,
            Nameable::Class(class) => walk_class(visitor, graph, class)?,
            Nameable::Option(option) => walk_option(visitor, graph, option)?,
        }
    }
    Ok(())
}

pub fn walk_namespace<V>(
    visitor: &mut V,
    graph: &SemanticGraph,
    namespace: NamespaceId,
) -> Result<(), V::Error>
where
    V: GraphVisitor + ?Sized,
{
    visitor.enter_namespace(graph, namespace)?;
    walk_scope(visitor, graph, ScopeId::Namespace(namespace))?;
    visitor.exit_namespace(graph, namespace)
}

pub fn walk_class<V>(visitor: &mut V, graph: &SemanticGraph, class: ClassId) -> Result<(), V::Error>
where
    V: GraphVisitor + ?Sized,
{
    visitor.enter_class(graph, class)?;

    for &edge in &graph.class(class).inherits {
        visitor.visit_inherits(graph, edge)?;
    }

    walk_scope(visitor, graph, ScopeId::Class(class))?;
    visitor.exit_class(graph, class)
}

pub fn walk_option<V>(visitor: &mut V, graph: &SemanticGraph, option: OptionId) -> Result<(), V::Error>
where
    V: GraphVisitor + ?Sized,
{
    visitor.visit_option(graph, option)?;

    let node = graph.option(option);
    if let Some(belongs) = node.belongs {
        visitor.visit_type(graph, option, graph.belongs_edge(belongs).type_id)?;
    }
    if let Some(initialized) = node.initialized {
        visitor.visit_expression(graph, option, graph.initialized_edge(initialized).expression)?;
    }
    Ok(())
}
