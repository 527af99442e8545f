use crate::semantics::{CliUnit, SemanticGraph, UnitId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything produced by compiling one root file: the shared graph, the
/// root unit and the unit created for every `.cli` file reached from it.
#[derive(Debug)]
pub struct UnitGraph {
    pub graph: SemanticGraph,
    pub root: UnitId,
    /// Canonical path of each parsed file
    pub units_by_path: HashMap<PathBuf, UnitId>,
    pub processing_duration: Duration,
}

impl UnitGraph {
    pub fn root_unit(&self) -> &CliUnit {
        self.graph.unit(self.root)
    }

    /// Unit parsed for `path`, which is canonicalized when it exists on disk
    pub fn unit_for_path(&self, path: &Path) -> Option<UnitId> {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.units_by_path.get(&canonical).copied()
    }

    pub fn log_success(&self, path: &Path) {
        crate::log_success!(
            crate::logging::codes::success::COMPILATION_COMPLETED,
            "Compilation succeeded",
            "file" => path.display(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0),
            "units" => self.graph.unit_count(),
            "classes" => self.graph.class_count(),
            "options" => self.graph.option_count()
        );
    }
}
