pub mod config;
pub mod id;
pub mod model;
pub mod scene;

pub use config::EditorConfig;
pub use id::ObjectId;
pub use model::*;
pub use scene::Scene;

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
