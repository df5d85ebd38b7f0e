//! Track catalog: discovery of the bundled audio namespace.
//!
//! A `ResourceNamespace` enumerates raw entries; `discover` turns them into an
//! ordered, immutable `Catalog` of `Track`s, skipping entries that fail to
//! resolve.

mod display;
mod model;
mod scan;

pub use model::{Catalog, Track};
pub use scan::{DirNamespace, discover};

#[cfg(test)]
mod tests;
