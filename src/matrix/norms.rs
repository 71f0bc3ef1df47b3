use crate::matrix::Matrix;
use crate::scalar::{FloatT, ScalarT};
use crate::types::NormKind;
use num_traits::{Float, Zero};

impl<T> Matrix<T>
where
    T: ScalarT,
{
    /// Matrix norm of the requested kind, computed directly from the
    /// active representation.
    ///
    /// Zero-free storage means the sums only traverse stored entries.
    pub fn norm(&self, kind: NormKind) -> T::Magnitude {
        norm_from(kind, self.rows, self.cols, self.iter())
    }
}

/// Norm of an entry stream for a `rows` x `cols` matrix.  Shared by the
/// matrix kinds and the views so that every representation feeds the same
/// reductions.
pub(crate) fn norm_from<T>(
    kind: NormKind,
    rows: usize,
    cols: usize,
    entries: impl Iterator<Item = (usize, usize, T)>,
) -> T::Magnitude
where
    T: ScalarT,
{
    match kind {
        NormKind::One => {
            let mut sums = vec![T::Magnitude::zero(); cols];
            for (_, c, v) in entries {
                sums[c] += v.modulus();
            }
            max_of(&sums)
        }
        NormKind::Infinity => {
            let mut sums = vec![T::Magnitude::zero(); rows];
            for (r, _, v) in entries {
                sums[r] += v.modulus();
            }
            max_of(&sums)
        }
        NormKind::Frobenius => entries
            .fold(T::Magnitude::zero(), |acc, (_, _, v)| acc + v.modulus_sqr())
            .sqrt(),
    }
}

// absolute sums are non-negative, so an empty axis reduces to zero
fn max_of<M: FloatT>(sums: &[M]) -> M {
    sums.iter().fold(M::zero(), |m, &s| M::max(m, s))
}
