//! Semantic graph: the program model built by the parser
//!
//! A single arena (`SemanticGraph`) owns all nodes and edges; everything else
//! refers to them through typed indices. After parsing the graph is only read.

pub mod error;
pub mod graph;
pub mod ids;
pub mod lookup;
pub mod nodes;

pub use error::{SemanticError, SemanticResult};
pub use graph::SemanticGraph;
pub use ids::*;
pub use lookup::QualifiedName;
pub use nodes::*;
