use crate::scalar::ScalarT;
use crate::storage::CooStorage;
use crate::types::Index;

/// Scoped accessor for one matrix entry, returned by
/// [`at_mut`](crate::Matrix::at_mut).
///
/// The proxy borrows the coordinate store, so creating one forces the
/// matrix into uncompressed form, and every writer below keeps the
/// no-stored-zeros invariant: assigning zero (or accumulating down to
/// zero) erases the key rather than storing it.
pub struct Entry<'a, T>
where
    T: ScalarT,
{
    store: &'a mut CooStorage<T>,
    index: Index,
}

impl<'a, T> Entry<'a, T>
where
    T: ScalarT,
{
    pub(crate) fn new(store: &'a mut CooStorage<T>, index: Index) -> Self {
        Entry { store, index }
    }

    /// current logical value; zero if the entry is not stored
    pub fn get(&self) -> T {
        self.store.value_or_zero(self.index)
    }

    /// `|x|` of the current logical value
    pub fn modulus(&self) -> T::Magnitude {
        self.get().modulus()
    }

    /// assign `v`, erasing the entry when `v` is zero
    pub fn assign(&mut self, v: T) {
        self.store.set(self.index, v);
    }

    /// accumulate `d` onto the entry, erasing on cancellation to zero
    pub fn add_assign(&mut self, d: T) {
        self.store.add(self.index, d);
    }

    /// subtract `d` from the entry, erasing on cancellation to zero
    pub fn sub_assign(&mut self, d: T) {
        let v = self.get() - d;
        self.store.set(self.index, v);
    }
}
