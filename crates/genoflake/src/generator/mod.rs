mod node;
mod policy;
mod status;

pub use node::*;
pub use policy::*;
pub use status::*;

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Mutex, MutexGuard};
#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{Mutex, MutexGuard, PoisonError};
