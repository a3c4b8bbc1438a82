mod binary;
#[cfg(feature = "sqlx")]
mod postgres;
#[cfg(feature = "serde")]
mod serialize;
mod sql;

#[cfg(feature = "serde")]
pub use serialize::*;
pub use sql::*;
