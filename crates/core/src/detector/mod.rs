pub mod context;
pub mod registry;
pub mod traits;

pub use context::AnalysisContext;
pub use registry::DetectorRegistry;
pub use traits::Detector;
