pub mod detection;
pub mod error;
pub mod models;

pub use detection::ocr::{OcrEngine, SegmentMode, TessOcr};
pub use detection::{PlateProcessor, Segmentation};
pub use error::PlateError;
pub use models::{BoundingBox, Candidate, Contour, Hierarchy, HierarchyNode, PlateReading};
