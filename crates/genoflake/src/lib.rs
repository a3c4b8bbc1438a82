#![cfg_attr(docsrs, feature(doc_cfg))]
//! Snowflake-style 64-bit IDs carrying a 6-bit business *gene*.
//!
//! ```text
//!  Bit Index:  63        63 62          22 21       16 15           13 12      10 9              0
//!              +-----------+--------------+-----------+---------------+----------+----------------+
//!  Field:      | sign (1)  | timestamp(41)| gene (6)  | datacenter (3)| node (3) | sequence (10)  |
//!              +-----------+--------------+-----------+---------------+----------+----------------+
//! ```
//!
//! ```
//! use genoflake::{Gene, Node};
//!
//! let node = Node::new(1, 1).unwrap();
//! let id = node.generate(Gene::ORDER).unwrap();
//! assert_eq!(id.gene(), Gene::ORDER);
//! assert_eq!(id.datacenter(), 1);
//! assert_eq!(id.to_string().parse::<genoflake::SnowflakeId>().unwrap(), id);
//! ```

mod bootstrap;
mod codec;
mod entity;
mod error;
mod gene;
mod generator;
mod id;
mod time;

pub use crate::bootstrap::*;
pub use crate::codec::*;
pub use crate::entity::*;
pub use crate::error::*;
pub use crate::gene::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
