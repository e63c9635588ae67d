//! # trees
//!
//! Three self-balancing ordered-set engines — AVL, splay, and treap — built
//! on a shared arena and a shared bidirectional in-order cursor.
//!
//! ## Modules
//!
//! - `arena` - index-based node storage shared by all three engines
//! - `cursor` - the bidirectional in-order cursor returned by `insert`/`find`/`begin`/`end`
//! - `avl` - height-balanced tree, rebalanced via rotations guided by a per-node balance tag
//! - `splay` - self-adjusting tree, rebalanced by splaying the touched node to the root
//! - `treap` - randomized tree, balanced in expectation via a heap over random priorities

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod arena;
pub mod avl;
pub mod cursor;
pub mod splay;
pub mod treap;

pub use avl::AvlTree;
pub use cursor::Cursor;
pub use splay::SplayTree;
pub use treap::Treap;
