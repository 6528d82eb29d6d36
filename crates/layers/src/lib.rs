pub mod fault_lines;
pub mod layer;
pub mod markers;
pub mod popup;
pub mod symbology;

pub use fault_lines::*;
pub use layer::*;
pub use markers::*;
pub use symbology::*;
