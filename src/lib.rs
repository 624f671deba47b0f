//! Frequent itemset mining with FPGrowth.
//!
//! Transactions are compressed into an [`FPTree`](fptree::FPTree), and
//! [`fp_growth`](fptree::fp_growth) mines it by recursively building a
//! conditional tree for each frequent item.

pub mod counter;
pub mod error;
pub mod fptree;
pub mod item;
pub mod item_counter;
pub mod itemizer;
pub mod itemset_writer;
pub mod transaction_reader;

pub use crate::error::DatasetError;
pub use crate::fptree::{fp_growth, FPTree, ItemSet};
