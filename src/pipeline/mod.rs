pub mod chain;
pub mod compress;
pub mod obfuscate;
pub mod stage;

pub use chain::*;
pub use compress::*;
pub use obfuscate::*;
pub use stage::*;
