use crate::scalar::ScalarT;
use crate::types::Index;
use std::collections::BTreeMap;

/// Coordinate storage: an ordered map from storage coordinates to values.
///
/// Iteration follows the key order, i.e. major axis first.  A zero value
/// is never stored: the writers below erase the key instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct CooStorage<T> {
    map: BTreeMap<Index, T>,
}

impl<T> CooStorage<T>
where
    T: ScalarT,
{
    pub fn new() -> Self {
        CooStorage {
            map: BTreeMap::new(),
        }
    }

    /// number of stored entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// stored value at `idx`, or zero if the key is absent
    pub fn value_or_zero(&self, idx: Index) -> T {
        self.map.get(&idx).copied().unwrap_or_else(T::zero)
    }

    /// store `v` at `idx`, erasing the key instead when `v` is zero
    pub fn set(&mut self, idx: Index, v: T) {
        if v.is_zero() {
            self.map.remove(&idx);
        } else {
            self.map.insert(idx, v);
        }
    }

    /// accumulate `d` onto the entry at `idx`, erasing on cancellation
    pub fn add(&mut self, idx: Index, d: T) {
        let v = self.value_or_zero(idx) + d;
        self.set(idx, v);
    }

    /// stored entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (Index, T)> + '_ {
        self.map.iter().map(|(&idx, &v)| (idx, v))
    }
}
