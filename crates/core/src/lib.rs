pub mod error;
pub mod logging;
pub mod normalize;
pub mod util;

pub use error::Result;
