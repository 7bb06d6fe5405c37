//! Key mapping between row items and the opaque keys the surface holds
//!
//! The surface never sees live items, only string keys. Every edit
//! notification is resolved back to an item through a [`KeyMapper`].

use std::collections::HashMap;

/// Translation between row items and surface keys
pub trait KeyMapper<T> {
    /// Key for `item`, issuing a new one if the item is not mapped yet
    fn key_for(&mut self, item: T) -> String;

    /// Map `item` under a fresh key without looking for an equal item
    ///
    /// Used when the caller knows the item is not mapped yet, such as right
    /// after [`KeyMapper::clear`].
    fn insert(&mut self, item: T) -> String;

    /// Live item for a key, `None` if the key is unknown
    fn get(&self, key: &str) -> Option<&T>;

    /// Forget a key; returns the item it mapped to
    fn remove(&mut self, key: &str) -> Option<T>;

    /// Forget every key
    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Default mapper issuing sequential keys `"1"`, `"2"`, ...
///
/// Keys are never reissued, so a stale key from a previous item set resolves
/// to nothing instead of to an unrelated row.
#[derive(Debug, Clone)]
pub struct DataKeyMapper<T> {
    items: HashMap<String, T>,
    next_key: u64,
}

impl<T> Default for DataKeyMapper<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            next_key: 1,
        }
    }
}

impl<T> DataKeyMapper<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new key
    fn next_key(&mut self) -> String {
        let key = self.next_key.to_string();
        self.next_key += 1;
        key
    }
}

impl<T: PartialEq> KeyMapper<T> for DataKeyMapper<T> {
    fn key_for(&mut self, item: T) -> String {
        if let Some(key) = self
            .items
            .iter()
            .find_map(|(key, existing)| (*existing == item).then(|| key.clone()))
        {
            return key;
        }
        self.insert(item)
    }

    fn insert(&mut self, item: T) -> String {
        let key = self.next_key();
        self.items.insert(key.clone(), item);
        key
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.items.get(key)
    }

    fn remove(&mut self, key: &str) -> Option<T> {
        self.items.remove(key)
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
