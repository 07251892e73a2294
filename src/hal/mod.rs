//! HAL building blocks: link sets, item representations and collections.

pub mod collection;
pub mod links;

pub use collection::{
    BasicCollectionDto, BasicCollectionMapper, CollectionDto, CollectionMapper, Embedded, HalItem,
};
pub use links::{Link, LinkSet};
