//! Ammunition types and the containers holding spare rounds.

use serde::{Deserialize, Serialize};

/// Index of an ammunition type in the [`Armory`](crate::inventory::Armory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AmmunitionId(pub(crate) usize);

impl AmmunitionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Catalogue entry for one ammunition type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmunitionSpec {
    pub name: String,
    /// Rounds a player can carry.
    pub capacity: u32,
}

impl AmmunitionSpec {
    pub fn new(name: &str, capacity: u32) -> Self {
        Self {
            name: name.to_string(),
            capacity,
        }
    }
}

/// Spare rounds of one ammunition type.
///
/// Additions are clamped to the capacity and removals to what is left; both
/// report the amount actually moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmunitionContainer {
    capacity: u32,
    count: u32,
}

impl AmmunitionContainer {
    pub fn new(capacity: u32) -> Self {
        Self { capacity, count: 0 }
    }

    pub fn add(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.room());
        self.count += added;
        added
    }

    pub fn remove(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn room(&self) -> u32 {
        self.capacity - self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_clamped_to_capacity() {
        let mut container = AmmunitionContainer::new(50);

        assert_eq!(container.add(30), 30);
        assert_eq!(container.add(30), 20);
        assert_eq!(container.count(), 50);
        assert_eq!(container.room(), 0);
    }

    #[test]
    fn remove_is_clamped_to_zero() {
        let mut container = AmmunitionContainer::new(50);
        container.add(12);

        assert_eq!(container.remove(5), 5);
        assert_eq!(container.remove(10), 7);
        assert!(container.is_empty());
        assert_eq!(container.remove(1), 0);
    }

    #[test]
    fn clear_empties_the_container() {
        let mut container = AmmunitionContainer::new(10);
        container.add(10);
        container.clear();

        assert!(container.is_empty());
        assert_eq!(container.capacity(), 10);
    }
}
