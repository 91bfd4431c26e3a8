pub mod core;
pub mod document;
pub mod export;
pub mod pipeline;
pub mod placement;
pub mod reconstruct;

pub use crate::core::geometry::{BBox, Point};
pub use crate::core::model::{
    DocumentReconstruction, PageReconstruction, PlacementInstruction, RenderMode, WordBlock,
    WordDetection,
};
pub use placement::{
    GeometryError, PageSize, PageWriter, PlacementConfig, TextLayerMapper, VerticalOrigin,
};
pub use reconstruct::{LineReconstructor, ReconstructConfig};
