//! Indented text outline of a parsed unit, used by `--dump`

use super::{walk_unit, GraphVisitor};
use crate::semantics::{
    ClassId, IncludeTarget, IncludesId, Nameable, NamespaceId, OptionId, SemanticGraph, UnitId,
};
use std::fmt::{self, Write};

#[derive(Debug, Default)]
pub struct OutlineWriter {
    out: String,
    depth: usize,
}

impl OutlineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.write_fmt(args)?;
        self.out.push('\n');
        Ok(())
    }
}

impl GraphVisitor for OutlineWriter {
    type Error = fmt::Error;

    fn enter_unit(&mut self, graph: &SemanticGraph, unit: UnitId) -> fmt::Result {
        self.line(format_args!("unit {}", graph.unit(unit).path.display()))?;
        self.depth += 1;
        Ok(())
    }

    fn exit_unit(&mut self, _graph: &SemanticGraph, _unit: UnitId) -> fmt::Result {
        self.depth -= 1;
        Ok(())
    }

    fn visit_includes(&mut self, graph: &SemanticGraph, edge: IncludesId) -> fmt::Result {
        let edge = graph.includes_edge(edge);
        let flavor = match edge.target {
            IncludeTarget::Cli(_) => "cli",
            IncludeTarget::Cxx(_) => "c++",
        };
        self.line(format_args!("include {} ({})", edge.spelling(), flavor))
    }

    fn enter_namespace(&mut self, graph: &SemanticGraph, namespace: NamespaceId) -> fmt::Result {
        let name = graph.name_of(Nameable::Namespace(namespace)).unwrap_or_default();
        self.line(format_args!("namespace {}", name))?;
        self.depth += 1;
        Ok(())
    }

    fn exit_namespace(&mut self, _graph: &SemanticGraph, _namespace: NamespaceId) -> fmt::Result {
        self.depth -= 1;
        Ok(())
    }

    fn enter_class(&mut self, graph: &SemanticGraph, class: ClassId) -> fmt::Result {
        let mut header = format!(
            "class {}",
            graph.name_of(Nameable::Class(class)).unwrap_or_default()
        );

        let bases: Vec<&str> = graph
            .bases(class)
            .map(|base| graph.name_of(Nameable::Class(base)).unwrap_or_default())
            .collect();
        if !bases.is_empty() {
            write!(header, " : {}", bases.join(", "))?;
        }
        if graph.class(class).is_abstract() {
            header.push_str(" = 0");
        }

        self.line(format_args!("{}", header))?;
        self.depth += 1;
        Ok(())
    }

    fn exit_class(&mut self, _graph: &SemanticGraph, _class: ClassId) -> fmt::Result {
        self.depth -= 1;
        Ok(())
    }

    fn visit_option(&mut self, graph: &SemanticGraph, option: OptionId) -> fmt::Result {
        let mut text = format!(
            "option {}",
            graph.names_of(Nameable::Option(option)).join("|")
        );
        if let Some(ty) = graph.option_type(option) {
            write!(text, " : {}", ty.spelling)?;
        }
        if let Some(init) = graph.initializer(option) {
            write!(text, " = {} ({})", init.value, init.kind)?;
        }
        self.line(format_args!("{}", text))?;

        self.depth += 1;
        for doc in &graph.option(option).doc {
            self.line(format_args!("doc {:?}", doc))?;
        }
        self.depth -= 1;
        Ok(())
    }
}

/// Render one unit's outline
pub fn render_outline(graph: &SemanticGraph, unit: UnitId) -> Result<String, fmt::Error> {
    let mut writer = OutlineWriter::new();
    walk_unit(&mut writer, graph, unit)?;
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::{ExpressionKind, ScopeId};
    use crate::utils::{Location, Position};
    use std::path::{Path, PathBuf};

    fn loc() -> Location {
        Location::new(Path::new("outline.cli"), Position::start())
    }

    #[test]
    fn test_outline_text() {
        let mut g = SemanticGraph::new();
        let unit = g.add_unit(PathBuf::from("/opts/outline.cli"), loc());

        let class = g.add_class(loc());
        g.add_names(ScopeId::Unit(unit), Nameable::Class(class), vec!["options".into()], loc())
            .unwrap();
        g.set_abstract(class, true).unwrap();

        let option = g.add_option(loc());
        let ty = g.intern_type(unit, "int", loc());
        g.set_belongs(option, ty, loc());
        g.add_names(
            ScopeId::Class(class),
            Nameable::Option(option),
            vec!["-j".into(), "--jobs".into()],
            loc(),
        )
        .unwrap();
        let expr = g.add_expression(ExpressionKind::IntLit, "4".into(), loc());
        g.set_initialized(option, expr, loc());
        g.option_mut(option).doc.push("Number of jobs".into());

        let text = render_outline(&g, unit).unwrap();
        assert_eq!(
            text,
            "unit /opts/outline.cli\n\
             \x20 class options = 0\n\
             \x20   option -j|--jobs : int = 4 (int)\n\
             \x20     doc \"Number of jobs\"\n"
        );
    }
}
