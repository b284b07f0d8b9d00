//! BK trees: an index answering "which keys are within distance D of this
//! one?" for any discrete metric, without embedding keys in a vector space.
//!
//! ```
//! use bkindex::{BkTree, LevenshteinMetric};
//!
//! let mut tree = BkTree::new(LevenshteinMetric);
//! tree.update(vec!["book", "books", "cake", "boo", "cape", "cart"]);
//!
//! let mut found: Vec<_> = tree.find(&"bo", 2).collect();
//! found.sort();
//! assert_eq!(vec![(1, &"boo"), (2, &"book")], found);
//! ```

#[macro_use]
extern crate derivative;

mod bk;
mod bknode;
mod bktree;
pub mod metric;

pub use bk::BkInRam;
pub use bknode::{BkNode, BkNodeMut, ChildEntry};
pub use bktree::by_distance::BkByDistance;
pub use bktree::find::BkFind;
pub use bktree::preorder::{Edge, Edges, Values};
pub use bktree::BkTree;
pub use metric::hamming::HammingMetric;
pub use metric::levenshtein::LevenshteinMetric;
pub use metric::strlen::StrLenMetric;
pub use metric::{Fallible, Metric, TryMetric};

/// Distance between two keys.
pub type Dist = usize;
