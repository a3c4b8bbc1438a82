mod decimal;
mod snowflake;

pub(crate) use decimal::*;
pub use snowflake::*;
