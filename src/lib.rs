/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]

// Note: Keep this in sync with `README.md`.  Note that the doc links must be removed.
//! # Rust Ephemeral Data Structures
//!
//! Rust Ephemeral Data Structures provides classic mutable container
//! primitives, each generic over the element types and independent of the
//! others.
//!
//! # Data Structures
//!
//! This crate implements the following data structures:
//!
//!   1. [`List`](#list)
//!   2. [`Queue`](#queue)
//!   3. [`RedBlackTreeMap`](#redblacktreemap)
//!
//! ## `List`
//!
//! A doubly linked list.  Pushing and popping at either end is constant
//! time, and every push hands back a node handle through which that element
//! can later be removed in constant time, wherever it sits in the list.
//!
//! ### Example
//!
//! ```rust
//! use reds::List;
//!
//! let mut list = List::new();
//!
//! list.push_back("a");
//! let b = list.push_back("b");
//! list.push_back("c");
//!
//! list.remove(b);
//!
//! assert_eq!(list.first(), Some(&"a"));
//! assert_eq!(list.last(), Some(&"c"));
//! assert_eq!(list.len(), 2);
//! ```
//!
//! ## `Queue`
//!
//! A FIFO (first in, first out) data structure with a capacity fixed at
//! construction.  Enqueueing onto a full queue hands the value back instead
//! of growing the buffer.
//!
//! ### Example
//!
//! ```rust
//! use reds::Queue;
//!
//! let mut queue = Queue::new(2);
//!
//! queue.enqueue("um").unwrap();
//! queue.enqueue("dois").unwrap();
//!
//! assert!(queue.enqueue("tres").is_err());
//! assert_eq!(queue.dequeue(), Some("um"));
//! ```
//!
//! ## `RedBlackTreeMap`
//!
//! A map implemented with a red-black tree, the self-balancing binary search
//! tree.  Insertion, removal, and lookup run in logarithmic time, and
//! traversal visits the bindings in ascending key order.
//!
//! ### Example
//!
//! ```rust
//! use reds::RedBlackTreeMap;
//!
//! let mut map = RedBlackTreeMap::new();
//!
//! map.insert(0, "zero");
//! map.insert(1, "one");
//! map.insert(1, "um");
//!
//! assert_eq!(map.get(&1), Some(&"um"));
//!
//! map.remove(&0);
//!
//! assert_eq!(map.get(&0), None);
//! ```

pub mod list;
pub mod map;
pub mod queue;

pub use crate::list::List;
pub use crate::map::red_black_tree_map::RedBlackTreeMap;
pub use crate::queue::Queue;
