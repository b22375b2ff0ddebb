pub mod demo;
pub mod read;
pub mod steps;
pub mod write;

pub use demo::*;
pub use read::*;
pub use steps::*;
pub use write::*;
