use num_complex::Complex;
use num_traits::{Float, FloatConst, FromPrimitive, Num, NumAssign};

/// Trait for the real magnitude types used throughout the crate
///
/// Norms and absolute values are always reported on a type implementing
/// FloatT, with implementations provided for the f32 and f64 native types.
/// It should be possible to use any other floating point type provided that
/// it satisfies the trait bounds of [FloatT](crate::FloatT).
///
/// FloatT relies on [num_traits](num_traits) for most of its constituent trait bounds.

pub trait FloatT:
    'static
    + Send
    + Sync
    + Float
    + FloatConst
    + NumAssign
    + Default
    + FromPrimitive
    + std::fmt::Display
    + std::fmt::LowerExp
    + std::fmt::Debug
{
}
impl FloatT for f32 {}
impl FloatT for f64 {}

/// Trait for the matrix element types
///
/// An admissible element type is closed under addition and multiplication,
/// is comparable with its own zero, and has a magnitude `|x|` on an
/// associated real type.  Implementations are provided for real floats,
/// complex floats and the signed integer types; the magnitude of an
/// integer entry is reported on f64.

pub trait ScalarT:
    'static + Send + Sync + Copy + Default + Num + NumAssign + std::fmt::Debug + std::fmt::Display
{
    /// The real type carrying `|x|`; also the return type of the norms.
    type Magnitude: FloatT;

    /// The magnitude `|x|`.   For complex values this is the modulus,
    /// not the componentwise absolute value.
    fn modulus(self) -> Self::Magnitude;

    /// The squared magnitude `|x|^2`.
    fn modulus_sqr(self) -> Self::Magnitude {
        let m = self.modulus();
        m * m
    }
}

impl ScalarT for f32 {
    type Magnitude = f32;
    fn modulus(self) -> f32 {
        self.abs()
    }
}

impl ScalarT for f64 {
    type Magnitude = f64;
    fn modulus(self) -> f64 {
        self.abs()
    }
}

impl ScalarT for i32 {
    type Magnitude = f64;
    fn modulus(self) -> f64 {
        f64::from(self.unsigned_abs())
    }
}

impl ScalarT for i64 {
    type Magnitude = f64;
    fn modulus(self) -> f64 {
        self.unsigned_abs() as f64
    }
}

impl<F> ScalarT for Complex<F>
where
    F: FloatT,
{
    type Magnitude = F;
    fn modulus(self) -> F {
        self.norm()
    }
    fn modulus_sqr(self) -> F {
        self.norm_sqr()
    }
}
