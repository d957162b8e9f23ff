pub mod chart;
pub mod compiler;
pub mod error;
pub mod simai;

pub use compiler::SimaiCompiler;
pub use error::Error;
