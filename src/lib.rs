//! Ordered maps and sets based on self-balancing binary search trees.
//!
//! [`Map`] and [`Set`] are balanced by a pluggable policy. The default, [`Avl`], caches every
//! subtree's height and restores the AVL invariant with rotations after each insertion and
//! removal. [`Aa`] is a level-based alternative.
//!
//! # Examples
//!
//! ```
//! let mut set = avl_index::Set::new();
//!
//! for item in 1..8 { set.insert(item); }
//!
//! assert_eq!(set.height(), 3);
//! assert_eq!(set.succ(&4, false), Some(&5));
//! assert!(!set.insert(4));
//! ```

#![warn(missing_docs)]

pub use balance::{Aa, Avl, Balance};
pub use error::DuplicateKey;
pub use map::Map;
pub use set::Set;

pub mod balance;
mod error;
pub mod map;
mod node;
pub mod set;
