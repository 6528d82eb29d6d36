pub mod fault_lines;
pub mod feed;
pub mod geojson;

pub use fault_lines::*;
pub use feed::*;
pub use geojson::*;
