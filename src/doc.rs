//! Documentation string parsing: segmentation, argument entries, and hint
//! loading.

mod entries;
mod hints;
mod section;

pub use entries::*;
pub use hints::*;
pub use section::*;
