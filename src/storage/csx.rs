use crate::error::FormatError;
use crate::scalar::ScalarT;
use crate::storage::CooStorage;
use crate::types::Index;
use std::iter::zip;

/// Compressed storage in three parallel arrays.
///
/// This is CSR when the owning matrix is `RowMajor` and CSC when it is
/// `ColumnMajor`; the container itself only knows slices.  `inner` has one
/// entry per slice plus a trailing total, `outer` holds the minor index of
/// each stored entry and `values` the entries themselves.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct CsxStorage<T> {
    /// slice start offsets, length `majors + 1`, last entry equals nnz
    pub inner: Vec<usize>,
    /// minor index of each stored entry
    pub outer: Vec<usize>,
    /// stored entries, slice by slice
    pub values: Vec<T>,
}

impl<T> CsxStorage<T>
where
    T: ScalarT,
{
    /// number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// number of slices
    pub fn majors(&self) -> usize {
        self.inner.len() - 1
    }

    /// minor indices and values of slice `i`
    pub fn slice(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let rng = self.inner[i]..self.inner[i + 1];
        zip(&self.outer[rng.clone()], &self.values[rng]).map(|(&minor, &v)| (minor, v))
    }

    /// stored value at the given coordinates, or None for a structural zero
    pub fn get(&self, idx: Index) -> Option<T> {
        let first = self.inner[idx.major];
        let last = self.inner[idx.major + 1];
        let minors = &self.outer[first..last];
        match minors.binary_search(&idx.minor) {
            Ok(offset) => Some(self.values[first + offset]),
            Err(_) => None,
        }
    }

    /// stored entries in slice-then-offset order
    pub fn iter(&self) -> impl Iterator<Item = (Index, T)> + '_ {
        (0..self.majors()).flat_map(move |major| {
            self.slice(major).map(move |(minor, v)| (Index { major, minor }, v))
        })
    }

    /// Build compressed arrays from an ordered coordinate store.
    ///
    /// Walks the store in key order, recording the slice boundary offsets
    /// as the major coordinate advances (empty slices coalesce into
    /// repeated offsets).
    pub fn from_coo(majors: usize, coo: &CooStorage<T>) -> Self {
        let mut inner = Vec::with_capacity(majors + 1);
        let mut outer = Vec::with_capacity(coo.len());
        let mut values = Vec::with_capacity(coo.len());

        inner.push(0);
        for (idx, v) in coo.iter() {
            while inner.len() <= idx.major {
                inner.push(outer.len());
            }
            outer.push(idx.minor);
            values.push(v);
        }
        while inner.len() <= majors {
            inner.push(outer.len());
        }

        CsxStorage {
            inner,
            outer,
            values,
        }
    }

    /// Rebuild the coordinate store, slice by slice.
    pub fn to_coo(&self) -> CooStorage<T> {
        let mut coo = CooStorage::new();
        for (idx, v) in self.iter() {
            coo.set(idx, v);
        }
        coo
    }

    /// Check that the compressed arrays are correctly formatted for a
    /// matrix with `majors` slices of extent `minors`.
    pub fn check_format(&self, majors: usize, minors: usize) -> Result<(), FormatError> {
        if self.outer.len() != self.values.len() {
            return Err(FormatError::IncompatibleDimension);
        }

        if self.inner.is_empty()
            || (self.inner.len() - 1) != majors
            || self.inner[majors] != self.outer.len()
        {
            return Err(FormatError::IncompatibleDimension);
        }

        //check for slice pointer monotonicity
        if self.inner.windows(2).any(|c| c[0] > c[1]) {
            return Err(FormatError::BadSlicePointers);
        }

        //check for minor index monotonicity within each slice
        for i in 0..majors {
            let rng = self.inner[i]..self.inner[i + 1];
            if self.outer[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(FormatError::BadMinorOrdering);
            }
        }
        //check for minor indices out of bounds
        if !self.outer.iter().all(|m| m < &minors) {
            return Err(FormatError::BadMinorIndex);
        }

        Ok(())
    }
}
