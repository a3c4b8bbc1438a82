mod coordinates;
mod default;
mod env;
mod host;

pub use coordinates::*;
pub use default::*;
pub use env::*;
pub use host::*;
