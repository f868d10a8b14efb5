//! Collections and handle-based data structures

pub use slotmap::{new_key_type, Key, SlotMap};

/// Generic handle-addressed storage keyed by a slotmap key type
pub type HandleMap<K, T> = SlotMap<K, T>;
