pub mod error;
pub mod graph;
pub mod session;
pub mod worker;

pub use error::PipelineError;
pub use graph::{Edge, GraphSnapshot, Node, NodeId, SampleSettings};
pub use session::{CameraState, DisplayPolicy, LodBand, RenderSink, Session};
