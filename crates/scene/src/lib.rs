pub mod basemap;
pub mod compose;
pub mod controls;
pub mod document;
pub mod map;

pub use basemap::*;
pub use compose::*;
pub use controls::*;
pub use document::*;
pub use map::*;
