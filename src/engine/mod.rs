//! Pure computation over rows fetched by the repository: the category tree
//! closure, price aggregation and listing order.

pub mod listing;
pub mod pricing;
pub mod tree;

pub use listing::{collapse_by_product, newest_first, pick_random};
pub use pricing::min_effective_price;
pub use tree::CategoryTree;
