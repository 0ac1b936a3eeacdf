use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Double-precision complex value.
///
/// `Complex` is a plain `Copy` pair; every operation returns a new value and
/// never touches its operands. Arithmetic stays in `f64` end to end.
///
/// # Examples
/// ```
/// use spectra_core::Complex;
///
/// let a = Complex::new(1., 2.);
/// let b = Complex::new(3., -1.);
///
/// assert_eq!(a.add(b), Complex::new(4., 1.));
/// assert_eq!(a.sub(b), Complex::new(-2., 3.));
/// assert_eq!(a.mul(b), Complex::new(5., 5.));
/// assert_eq!(Complex::new(3., 4.).magnitude(), 5.);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// `0 + 0i`
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    /// `1 + 0i`
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

    /// Build a value from its real and imaginary parts.
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Build a purely real value.
    #[inline]
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Build a value from polar coordinates: `(magnitude·cos(angle), magnitude·sin(angle))`.
    ///
    /// `angle` is in radians.
    #[inline]
    pub fn from_polar(magnitude: f64, angle: f64) -> Self {
        Self {
            re: magnitude * angle.cos(),
            im: magnitude * angle.sin(),
        }
    }

    /// Component-wise sum.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }

    /// Component-wise difference.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }

    /// Complex product `(ac - bd, ad + bc)`.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }

    /// Multiply both parts by a real factor.
    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }

    /// Complex conjugate.
    #[inline]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Squared modulus `re² + im²`.
    #[inline]
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Modulus `sqrt(re² + im²)`.
    ///
    /// Evaluated with [`f64::hypot`] so large components do not overflow the
    /// intermediate square.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Phase angle in radians, in `(-pi, pi]`.
    #[inline]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }
}

impl Add for Complex {
    type Output = Complex;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Complex::add(self, rhs)
    }
}

impl Sub for Complex {
    type Output = Complex;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Complex::sub(self, rhs)
    }
}

impl Mul for Complex {
    type Output = Complex;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Complex::mul(self, rhs)
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Neg for Complex {
    type Output = Complex;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl Zero for Complex {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

impl One for Complex {
    fn one() -> Self {
        Self::ONE
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::from_real(re)
    }
}

impl From<num_complex::Complex<f64>> for Complex {
    fn from(value: num_complex::Complex<f64>) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

impl From<Complex> for num_complex::Complex<f64> {
    fn from(value: Complex) -> Self {
        num_complex::Complex::new(value.re, value.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.im.is_sign_negative() { '-' } else { '+' };
        match f.precision() {
            Some(p) => write!(f, "{:.*}{sign}{:.*}i", p, self.re, p, self.im.abs()),
            None => write!(f, "{}{sign}{}i", self.re, self.im.abs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn arithmetic_does_not_touch_operands() {
        let a = Complex::new(1.5, -2.0);
        let b = Complex::new(-0.5, 4.0);
        let _ = a.add(b);
        let _ = a.mul(b);
        assert_eq!(a, Complex::new(1.5, -2.0));
        assert_eq!(b, Complex::new(-0.5, 4.0));
    }

    #[test]
    fn product_follows_ac_minus_bd() {
        let a = Complex::new(2.0, 3.0);
        let b = Complex::new(4.0, -5.0);
        // (8 + 15) + (-10 + 12)i
        assert_eq!(a.mul(b), Complex::new(23.0, 2.0));
        assert_eq!(a * b, a.mul(b));
    }

    #[test]
    fn operators_match_named_methods() {
        let a = Complex::new(0.25, 7.0);
        let b = Complex::new(-3.0, 1.0);
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.sub(b));
        assert_eq!(-a, Complex::new(-0.25, -7.0));
        assert_eq!(a * 2.0, Complex::new(0.5, 14.0));
    }

    #[test]
    fn conjugate_product_is_norm_sqr() {
        let a = Complex::new(3.0, -4.0);
        assert_eq!(a.conj(), Complex::new(3.0, 4.0));
        assert_eq!(a.conj().conj(), a);
        assert_eq!(a.mul(a.conj()), Complex::from_real(a.norm_sqr()));
    }

    #[test]
    fn magnitude_of_pythagorean_triple() {
        assert_eq!(Complex::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Complex::new(-5.0, 12.0).magnitude(), 13.0);
        assert_eq!(Complex::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn magnitude_does_not_overflow_large_parts() {
        let big = Complex::new(1e200, 1e200);
        assert!(big.magnitude().is_finite());
        assert_abs_diff_eq!(big.magnitude() / 1e200, 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn from_polar_quarter_turns() {
        let z = Complex::from_polar(1.0, 0.0);
        assert_eq!(z, Complex::ONE);

        let z = Complex::from_polar(2.0, FRAC_PI_2);
        assert_abs_diff_eq!(z.re, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(z.im, 2.0, epsilon = 1e-15);

        let z = Complex::from_polar(1.0, -PI);
        assert_abs_diff_eq!(z.re, -1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn nan_propagates() {
        let z = Complex::new(f64::NAN, 1.0);
        assert!(z.magnitude().is_nan());
        assert!(z.add(Complex::ONE).re.is_nan());
    }

    #[test]
    fn num_complex_conversion_is_lossless() {
        let z = Complex::new(0.1, -0.7);
        let nc: num_complex::Complex<f64> = z.into();
        assert_eq!(Complex::from(nc), z);
        assert_eq!(nc.norm(), z.magnitude());
    }

    #[test]
    fn display_respects_precision() {
        assert_eq!(format!("{:.2}", Complex::new(1.0, -0.5)), "1.00-0.50i");
        assert_eq!(format!("{}", Complex::new(1.0, 2.0)), "1+2i");
    }
}
