//! Type definitions

pub mod location;
pub mod plan;
pub mod stop;
pub mod timeline;

pub use location::*;
pub use plan::*;
pub use stop::*;
pub use timeline::*;
