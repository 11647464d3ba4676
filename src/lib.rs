pub mod camera;
pub mod cli;
pub mod mesh;
pub mod project;
pub mod renderer;

pub use camera::{InputDeltas, OrbitCamera};
pub use mesh::{IndexData, MeshError, SliceMesh};
pub use project::{project_frame, Winding};
