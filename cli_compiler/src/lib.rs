// Internal modules
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod semantics;
pub mod syntax;
pub mod tokens;
pub mod traversal;
pub mod utils;

// Re-export key types for library consumers
pub use pipeline::{
    compile_file, compile_source, CompilationSession, DiagnosticOutput, PipelineError,
    PipelineResult, UnitGraph,
};
pub use semantics::SemanticGraph;
pub use traversal::{walk_graph, walk_unit, GraphVisitor};
