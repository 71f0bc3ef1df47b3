use crate::scalar::ScalarT;
use crate::storage::{CooStorage, CsxStorage};
use crate::types::Index;
use std::iter::zip;
use std::ops::Range;

/// Modified compressed storage for square matrices.
///
/// `values[..n]` holds the diagonal, one slot per slice whether the entry
/// is zero or not.  `values[n..]` holds the off-diagonal entries grouped
/// by slice and ordered by minor index.  `bind[..n]` holds the absolute
/// offset in `values` where each slice's off-diagonal entries begin (the
/// first slice starts at `n`, the last terminates at `values.len()`), and
/// `bind[n..]` the minor index of each off-diagonal entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct MsxStorage<T> {
    pub values: Vec<T>,
    pub bind: Vec<usize>,
}

impl<T> MsxStorage<T>
where
    T: ScalarT,
{
    /// diagonal slots
    pub fn diag(&self, n: usize) -> &[T] {
        &self.values[..n]
    }

    /// positions of slice `i`'s off-diagonal entries within `values`/`bind`
    pub fn offdiag_range(&self, n: usize, i: usize) -> Range<usize> {
        let first = self.bind[i];
        let last = if i + 1 < n {
            self.bind[i + 1]
        } else {
            self.values.len()
        };
        first..last
    }

    /// off-diagonal entries of slice `i` as (minor, value) pairs
    pub fn offdiag_slice(&self, n: usize, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let rng = self.offdiag_range(n, i);
        zip(&self.bind[rng.clone()], &self.values[rng]).map(|(&minor, &v)| (minor, v))
    }

    /// logical nonzero count: nonzero diagonal slots plus all
    /// off-diagonal entries
    pub fn nnz(&self, n: usize) -> usize {
        let diag = self.diag(n).iter().filter(|v| !v.is_zero()).count();
        diag + (self.values.len() - n)
    }

    /// value at the given coordinates; zero for structural zeros
    pub fn get(&self, n: usize, idx: Index) -> T {
        if idx.major == idx.minor {
            return self.values[idx.major];
        }
        let rng = self.offdiag_range(n, idx.major);
        let minors = &self.bind[rng.clone()];
        match minors.binary_search(&idx.minor) {
            Ok(offset) => self.values[rng.start + offset],
            Err(_) => T::zero(),
        }
    }

    /// Stored entries of slice `i` in minor order, with the diagonal slot
    /// merged into its sorted position and skipped when zero.
    pub fn merged_slice(&self, n: usize, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let rng = self.offdiag_range(n, i);
        let minors = &self.bind[rng.clone()];
        // off-diagonal minors never equal i, so the partition point is the
        // sorted position of the diagonal entry
        let split = rng.start + minors.partition_point(|&m| m < i);
        let diag = self.values[i];

        let before = rng.start..split;
        let after = split..rng.end;
        zip(&self.bind[before.clone()], &self.values[before])
            .map(|(&m, &v)| (m, v))
            .chain((!diag.is_zero()).then_some((i, diag)))
            .chain(zip(&self.bind[after.clone()], &self.values[after]).map(|(&m, &v)| (m, v)))
    }

    /// stored entries in slice-then-minor order, diagonal merged
    pub fn iter_merged(&self, n: usize) -> impl Iterator<Item = (Index, T)> + '_ {
        (0..n).flat_map(move |major| {
            self.merged_slice(n, major)
                .map(move |(minor, v)| (Index { major, minor }, v))
        })
    }

    /// Build the diagonal-split arrays from an ordered coordinate store.
    pub fn from_coo(n: usize, coo: &CooStorage<T>) -> Self {
        let mut diag = vec![T::zero(); n];
        let mut starts = Vec::with_capacity(n);
        let mut minors = Vec::new();
        let mut offdiag = Vec::new();

        for (idx, v) in coo.iter() {
            if idx.major == idx.minor {
                diag[idx.major] = v;
                continue;
            }
            while starts.len() <= idx.major {
                starts.push(offdiag.len());
            }
            minors.push(idx.minor);
            offdiag.push(v);
        }
        while starts.len() < n {
            starts.push(offdiag.len());
        }

        Self::assemble(n, diag, starts, minors, offdiag)
    }

    /// Build the diagonal-split arrays from compressed storage.
    pub fn from_csx(n: usize, csx: &CsxStorage<T>) -> Self {
        let mut diag = vec![T::zero(); n];
        let mut starts = Vec::with_capacity(n);
        let mut minors = Vec::new();
        let mut offdiag = Vec::new();

        for i in 0..n {
            starts.push(offdiag.len());
            for (minor, v) in csx.slice(i) {
                if minor == i {
                    diag[i] = v;
                } else {
                    minors.push(minor);
                    offdiag.push(v);
                }
            }
        }

        Self::assemble(n, diag, starts, minors, offdiag)
    }

    fn assemble(
        n: usize,
        diag: Vec<T>,
        starts: Vec<usize>,
        minors: Vec<usize>,
        offdiag: Vec<T>,
    ) -> Self {
        let mut values = diag;
        values.extend(offdiag);

        let mut bind: Vec<usize> = starts.iter().map(|s| s + n).collect();
        bind.extend(minors);

        MsxStorage { values, bind }
    }

    /// Merge the diagonal back into plain compressed storage.
    pub fn to_csx(&self, n: usize) -> CsxStorage<T> {
        let mut inner = Vec::with_capacity(n + 1);
        let mut outer = Vec::new();
        let mut values = Vec::new();

        inner.push(0);
        for i in 0..n {
            for (minor, v) in self.merged_slice(n, i) {
                outer.push(minor);
                values.push(v);
            }
            inner.push(outer.len());
        }

        CsxStorage {
            inner,
            outer,
            values,
        }
    }

    /// Rebuild the coordinate store: nonzero diagonal slots first, then
    /// the off-diagonal entries slice by slice.
    pub fn to_coo(&self, n: usize) -> CooStorage<T> {
        let mut coo = CooStorage::new();
        for (i, &v) in self.diag(n).iter().enumerate() {
            if !v.is_zero() {
                coo.set(Index { major: i, minor: i }, v);
            }
        }
        for major in 0..n {
            for (minor, v) in self.offdiag_slice(n, major) {
                coo.set(Index { major, minor }, v);
            }
        }
        coo
    }
}
