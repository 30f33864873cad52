pub mod errors;
pub mod ids;
pub mod input;
pub mod plan;
pub mod report;
pub mod safepath;
pub mod target;

pub use errors::*;
pub use ids::*;
pub use input::*;
pub use plan::*;
pub use report::*;
pub use safepath::*;
pub use target::*;
