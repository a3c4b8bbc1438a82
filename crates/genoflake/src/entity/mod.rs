mod base;
mod hooks;

pub use base::*;
pub use hooks::*;
