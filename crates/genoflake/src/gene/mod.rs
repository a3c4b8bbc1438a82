mod catalogue;
mod hash;

pub use catalogue::*;
pub(crate) use hash::Fnv1a;
pub use hash::{hash_id, hash_ids, hash_string};
