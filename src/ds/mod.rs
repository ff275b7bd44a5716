pub mod bitset;
pub mod insertion_map;

pub use bitset::BitSet;
pub use insertion_map::InsertionOrderMap;
