pub mod colors;
pub mod export;
pub mod legend;
pub mod painter;
pub mod picking;
pub mod primitives;
pub mod scene;

pub use export::export_image;
