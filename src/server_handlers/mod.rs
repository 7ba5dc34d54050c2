pub mod catalog;
pub mod docs;
pub mod plan;

pub use catalog::*;
pub use docs::*;
pub use plan::*;
