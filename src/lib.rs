//! A treap whose heap order is restored by explicit rotations.
//!
//! Insertion walks down recording its ancestors on an explicit stack and rotates the new node
//! upward; deletion rotates the doomed node downward until it is a leaf. Neither operation
//! recurses and nodes carry no parent links.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod entry;
mod error;
pub mod treap;

pub use crate::error::{Error, Result};
pub use crate::treap::TreapSet;
