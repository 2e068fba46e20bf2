//! Sparse, exact trigonometric polynomials.
//!
//! A [`TrigPolynomial`] is a finite complex-weighted sum of
//! [`TrigMonomial`] basis terms, held as an ordered map from monomial to
//! coefficient. An absent key is a zero coefficient. All arithmetic returns
//! new values; nothing is mutated in place except through the `*Assign`
//! operators on an owned value.
//!
//! Additive cancellation never removes a key from the map — a term whose
//! coefficient lands on exact zero stays in the support, and only
//! [`sieved`][TrigPolynomial::sieved] drops terms by magnitude. Exact zero
//! bookkeeping and tolerance-based sieving are deliberately distinct.

use std::collections::BTreeMap;
use num_complex::Complex64 as C64;
use thiserror::Error;
use crate::monomial::TrigMonomial;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolynomialError {
    #[error("cannot compare coefficient values of polynomials with different key sets")]
    MismatchedSupport,
}
pub type PolynomialResult<T> = Result<T, PolynomialError>;
use PolynomialError::*;

/// Default magnitude tolerance for [`TrigPolynomial::sieved`] and the
/// equivalence checks.
pub const DEFAULT_CUTOFF: f64 = 1e-12;

/// A sparse mapping from [`TrigMonomial`] to a complex coefficient.
///
/// ```
/// use autogate::polynomial::TrigPolynomial;
///
/// // cos²(x) + sin²(x) = 1, exactly
/// let cos = TrigPolynomial::cos('x', 1);
/// let sin = TrigPolynomial::sin('x', 1);
/// let sum = (&cos * &cos) + (&sin * &sin);
/// assert!(TrigPolynomial::equivalent(
///     &sum.sieved(None),
///     &TrigPolynomial::one(),
///     None,
/// ));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrigPolynomial {
    terms: BTreeMap<TrigMonomial, C64>,
}

impl TrigPolynomial {
    /// Construct a new `TrigPolynomial` from `(monomial, coefficient)` pairs.
    ///
    /// Coefficients sharing a monomial are summed.
    pub fn new<I>(terms: I) -> Self
    where I: IntoIterator<Item = (TrigMonomial, C64)>
    {
        let mut acc: BTreeMap<TrigMonomial, C64> = BTreeMap::new();
        for (monomial, coefficient) in terms.into_iter() {
            *acc.entry(monomial).or_insert_with(|| 0.0.into())
                += coefficient;
        }
        Self { terms: acc }
    }

    /// Return the zero polynomial (empty term map).
    pub fn zero() -> Self { Self { terms: BTreeMap::new() } }

    /// Return the unit polynomial, { identity monomial → 1 }.
    pub fn one() -> Self {
        Self { terms: [(TrigMonomial::one(), C64::from(1.0))].into() }
    }

    /// Return the canonical two-term expansion of cos(`order` × `symbol`),
    /// ½ exp(+*ikθ*) + ½ exp(−*ikθ*).
    ///
    /// *Panics if `order` is zero.*
    pub fn cos(symbol: char, order: i32) -> Self {
        let plus = TrigMonomial::var(symbol, order)
            .expect("cos: nonzero order");
        let minus = plus.conj();
        Self { terms: [(plus, C64::from(0.5)), (minus, C64::from(0.5))].into() }
    }

    /// Return the canonical two-term expansion of sin(`order` × `symbol`),
    /// −½*i* exp(+*ikθ*) + ½*i* exp(−*ikθ*).
    ///
    /// *Panics if `order` is zero.*
    pub fn sin(symbol: char, order: i32) -> Self {
        let plus = TrigMonomial::var(symbol, order)
            .expect("sin: nonzero order");
        let minus = plus.conj();
        Self {
            terms: [
                (plus, C64::new(0.0, -0.5)),
                (minus, C64::new(0.0, 0.5)),
            ].into(),
        }
    }

    /// Return a reference to the term map.
    pub fn terms(&self) -> &BTreeMap<TrigMonomial, C64> { &self.terms }

    /// Return the number of terms in the support, zero coefficients included.
    pub fn nterm(&self) -> usize { self.terms.len() }

    /// Return the coefficient of `monomial`, or `None` if it is outside the
    /// support.
    pub fn coefficient(&self, monomial: &TrigMonomial) -> Option<C64> {
        self.terms.get(monomial).copied()
    }

    /// Return an iterator over `(monomial, coefficient)` pairs in canonical
    /// key order.
    pub fn iter(&self) -> impl Iterator<Item = (&TrigMonomial, &C64)> {
        self.terms.iter()
    }

    /// Return the complex conjugate of `self`.
    ///
    /// Every coefficient is conjugated while the monomial keys are left
    /// unchanged. This is distinct from [`TrigMonomial::conj`], which negates
    /// orders; a conjugate-transpose operator needs both.
    pub fn conj(&self) -> Self {
        let terms: BTreeMap<TrigMonomial, C64> =
            self.terms.iter()
            .map(|(monomial, coefficient)|
                (monomial.clone(), coefficient.conj()))
            .collect();
        Self { terms }
    }

    /// Return the complex conjugate of the *function* represented by `self`,
    /// conjugating every coefficient and negating every monomial.
    ///
    /// This is the conjugation a conjugate-transpose operator needs:
    /// conj(Σ c exp(*i* Σ *kθ*)) = Σ c̄ exp(−*i* Σ *kθ*). Compare
    /// [`conj`][Self::conj], which touches coefficients only.
    pub fn adjoint(&self) -> Self {
        let terms: BTreeMap<TrigMonomial, C64> =
            self.terms.iter()
            .map(|(monomial, coefficient)|
                (monomial.conj(), coefficient.conj()))
            .collect();
        Self { terms }
    }

    /// Return a copy of `self` retaining only terms whose coefficient
    /// magnitude exceeds `cutoff`, which defaults to
    /// [`DEFAULT_CUTOFF`].
    pub fn sieved(&self, cutoff: Option<f64>) -> Self {
        let cutoff = cutoff.unwrap_or(DEFAULT_CUTOFF);
        let terms: BTreeMap<TrigMonomial, C64> =
            self.terms.iter()
            .filter(|(_, coefficient)| coefficient.norm() > cutoff)
            .map(|(monomial, coefficient)| (monomial.clone(), *coefficient))
            .collect();
        Self { terms }
    }

    /// Return `true` if `a` and `b` have identical term counts and identical
    /// ordered key sets.
    pub fn equivalent_keys(a: &Self, b: &Self) -> bool {
        a.terms.len() == b.terms.len()
            && a.terms.keys().zip(b.terms.keys()).all(|(ka, kb)| ka == kb)
    }

    fn values_within(a: &Self, b: &Self, cutoff: f64) -> bool {
        a.terms.values().zip(b.terms.values())
            .all(|(ca, cb)| (ca - cb).norm() <= cutoff)
    }

    /// Compare corresponding coefficients of `a` and `b`, returning `true`
    /// only if every pairwise magnitude difference is within `cutoff`
    /// (default [`DEFAULT_CUTOFF`]).
    ///
    /// Mismatched key sets are a precondition violation, not a `false`:
    /// callers must establish [`equivalent_keys`][Self::equivalent_keys]
    /// first. See [`equivalent`][Self::equivalent] for the safe boolean
    /// combination.
    pub fn equivalent_values(a: &Self, b: &Self, cutoff: Option<f64>)
        -> PolynomialResult<bool>
    {
        if !Self::equivalent_keys(a, b) { return Err(MismatchedSupport); }
        Ok(Self::values_within(a, b, cutoff.unwrap_or(DEFAULT_CUTOFF)))
    }

    /// Return `true` if `a` and `b` have identical key sets and all
    /// corresponding coefficients agree to within `cutoff` (default
    /// [`DEFAULT_CUTOFF`]).
    pub fn equivalent(a: &Self, b: &Self, cutoff: Option<f64>) -> bool {
        Self::equivalent_keys(a, b)
            && Self::values_within(a, b, cutoff.unwrap_or(DEFAULT_CUTOFF))
    }
}

impl From<C64> for TrigPolynomial {
    fn from(a: C64) -> Self {
        Self { terms: [(TrigMonomial::one(), a)].into() }
    }
}

impl From<f64> for TrigPolynomial {
    fn from(a: f64) -> Self { C64::from(a).into() }
}

impl std::ops::Neg for &TrigPolynomial {
    type Output = TrigPolynomial;

    fn neg(self) -> Self::Output {
        let terms: BTreeMap<TrigMonomial, C64> =
            self.terms.iter()
            .map(|(monomial, coefficient)| (monomial.clone(), -coefficient))
            .collect();
        TrigPolynomial { terms }
    }
}

impl std::ops::Neg for TrigPolynomial {
    type Output = TrigPolynomial;

    fn neg(self) -> Self::Output { -&self }
}

impl std::ops::AddAssign<&TrigPolynomial> for TrigPolynomial {
    fn add_assign(&mut self, rhs: &TrigPolynomial) {
        for (monomial, coefficient) in rhs.terms.iter() {
            *self.terms.entry(monomial.clone()).or_insert_with(|| 0.0.into())
                += coefficient;
        }
    }
}

impl std::ops::SubAssign<&TrigPolynomial> for TrigPolynomial {
    fn sub_assign(&mut self, rhs: &TrigPolynomial) {
        for (monomial, coefficient) in rhs.terms.iter() {
            *self.terms.entry(monomial.clone()).or_insert_with(|| 0.0.into())
                -= coefficient;
        }
    }
}

macro_rules! impl_addsub_poly {
    ( $trait:ident, $fun:ident, $op_assign:tt ) => {
        impl std::ops::$trait<&TrigPolynomial> for &TrigPolynomial {
            type Output = TrigPolynomial;

            fn $fun(self, rhs: &TrigPolynomial) -> Self::Output {
                let mut out = self.clone();
                out $op_assign rhs;
                out
            }
        }

        impl std::ops::$trait<TrigPolynomial> for TrigPolynomial {
            type Output = TrigPolynomial;

            fn $fun(self, rhs: TrigPolynomial) -> Self::Output {
                let mut out = self;
                out $op_assign &rhs;
                out
            }
        }
    }
}
impl_addsub_poly!(Add, add, +=);
impl_addsub_poly!(Sub, sub, -=);

/// Full polynomial convolution: every pair of terms, one from each operand,
/// contributes the product of its coefficients at the product of its keys.
/// Cost is proportional to the product of the two supports' sizes.
impl std::ops::Mul<&TrigPolynomial> for &TrigPolynomial {
    type Output = TrigPolynomial;

    fn mul(self, rhs: &TrigPolynomial) -> Self::Output {
        let mut terms: BTreeMap<TrigMonomial, C64> = BTreeMap::new();
        for (ma, ca) in self.terms.iter() {
            for (mb, cb) in rhs.terms.iter() {
                *terms.entry(ma * mb).or_insert_with(|| 0.0.into())
                    += ca * cb;
            }
        }
        TrigPolynomial { terms }
    }
}

impl std::ops::Mul<TrigPolynomial> for TrigPolynomial {
    type Output = TrigPolynomial;

    fn mul(self, rhs: TrigPolynomial) -> Self::Output { &self * &rhs }
}

impl std::ops::AddAssign<C64> for TrigPolynomial {
    fn add_assign(&mut self, rhs: C64) {
        *self.terms.entry(TrigMonomial::one()).or_insert_with(|| 0.0.into())
            += rhs;
    }
}

impl std::ops::SubAssign<C64> for TrigPolynomial {
    fn sub_assign(&mut self, rhs: C64) {
        *self.terms.entry(TrigMonomial::one()).or_insert_with(|| 0.0.into())
            -= rhs;
    }
}

impl std::ops::MulAssign<C64> for TrigPolynomial {
    fn mul_assign(&mut self, rhs: C64) {
        self.terms.values_mut().for_each(|coefficient| *coefficient *= rhs);
    }
}

impl std::ops::DivAssign<C64> for TrigPolynomial {
    fn div_assign(&mut self, rhs: C64) {
        self.terms.values_mut().for_each(|coefficient| *coefficient /= rhs);
    }
}

macro_rules! impl_scalar_poly {
    ( $trait:ident, $fun:ident, $op_assign:tt ) => {
        impl std::ops::$trait<C64> for TrigPolynomial {
            type Output = TrigPolynomial;

            fn $fun(self, rhs: C64) -> Self::Output {
                let mut out = self;
                out $op_assign rhs;
                out
            }
        }

        impl std::ops::$trait<C64> for &TrigPolynomial {
            type Output = TrigPolynomial;

            fn $fun(self, rhs: C64) -> Self::Output {
                let mut out = self.clone();
                out $op_assign rhs;
                out
            }
        }
    }
}
impl_scalar_poly!(Add, add, +=);
impl_scalar_poly!(Sub, sub, -=);
impl_scalar_poly!(Mul, mul, *=);
impl_scalar_poly!(Div, div, /=);

impl std::ops::Add<TrigPolynomial> for C64 {
    type Output = TrigPolynomial;

    fn add(self, rhs: TrigPolynomial) -> Self::Output { rhs + self }
}

impl std::ops::Sub<TrigPolynomial> for C64 {
    type Output = TrigPolynomial;

    fn sub(self, rhs: TrigPolynomial) -> Self::Output { -rhs + self }
}

impl std::ops::Mul<TrigPolynomial> for C64 {
    type Output = TrigPolynomial;

    fn mul(self, rhs: TrigPolynomial) -> Self::Output { rhs * self }
}

impl std::fmt::Display for TrigPolynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() { return write!(f, "0"); }
        for (monomial, coefficient) in self.terms.iter() {
            writeln!(
                f, "+({:24.16E} + {:24.16E}i) * {}",
                coefficient.re, coefficient.im, monomial,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rand::Rng;
    use crate::c;
    use super::*;

    fn var(symbol: char, order: i32) -> TrigMonomial {
        TrigMonomial::var(symbol, order).unwrap()
    }

    fn random_poly<R: Rng>(rng: &mut R, nterm: usize) -> TrigPolynomial {
        TrigPolynomial::new(
            (0..nterm).map(|k| {
                let monomial = var('a', k as i32 + 1);
                let coefficient =
                    c!(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
                (monomial, coefficient)
            })
        )
    }

    #[test]
    fn zero_one() {
        assert_eq!(TrigPolynomial::zero().nterm(), 0);
        assert_eq!(
            TrigPolynomial::one().coefficient(&TrigMonomial::one()),
            Some(c!(1.0)),
        );
    }

    #[test]
    fn equivalent_reflexive() {
        let p = TrigPolynomial::cos('x', 1) * TrigPolynomial::sin('y', 2);
        assert!(TrigPolynomial::equivalent(&p, &p, None));
        assert!(TrigPolynomial::equivalent(&p, &-(-p.clone()), None));
    }

    #[test]
    fn distributive() {
        let a = TrigPolynomial::cos('x', 1);
        let b = TrigPolynomial::sin('y', 1);
        let c = TrigPolynomial::cos('z', 2) + c!(0.25);
        let lhs = &a * &(&b + &c);
        let rhs = (&a * &b) + (&a * &c);
        assert!(TrigPolynomial::equivalent(&lhs, &rhs, None));
    }

    #[test]
    fn cos2_plus_sin2() {
        let cos = TrigPolynomial::cos('x', 1);
        let sin = TrigPolynomial::sin('x', 1);
        let sum = ((&cos * &cos) + (&sin * &sin)).sieved(None);
        assert_eq!(sum.nterm(), 1);
        assert_eq!(sum.coefficient(&TrigMonomial::one()), Some(c!(1.0)));
        assert!(TrigPolynomial::equivalent(&sum, &TrigPolynomial::one(), None));
    }

    #[test]
    fn cancellation_keeps_keys() {
        let p = TrigPolynomial::cos('x', 1);
        let diff = &p - &p;
        // exact zeros stay in the support; only sieving removes them
        assert!(TrigPolynomial::equivalent_keys(&p, &diff));
        assert_eq!(diff.sieved(None).nterm(), 0);
    }

    #[test]
    fn sieve_idempotent() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let p = random_poly(&mut rng, 8) * c!(1e-10);
            let once = p.sieved(Some(1e-11));
            let twice = once.sieved(Some(1e-11));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn scalar_ops() {
        let p = TrigPolynomial::cos('x', 1);
        let q = (&p * c!(2.0)) / c!(2.0);
        assert!(TrigPolynomial::equivalent(&p, &q, None));

        let r = &p + c!(1.0);
        assert_eq!(r.coefficient(&TrigMonomial::one()), Some(c!(1.0)));
        assert_eq!(r.coefficient(&var('x', 1)), Some(c!(0.5)));

        let s = c!(1.0) - p.clone();
        assert_eq!(s.coefficient(&TrigMonomial::one()), Some(c!(1.0)));
        assert_eq!(s.coefficient(&var('x', 1)), Some(c!(-0.5)));
    }

    #[test]
    fn conj_coefficients_only() {
        let p = TrigPolynomial::sin('x', 1);
        let q = p.conj();
        assert!(TrigPolynomial::equivalent_keys(&p, &q));
        assert_eq!(q.coefficient(&var('x', 1)), Some(c!(i 0.5)));
        assert_eq!(q.coefficient(&var('x', -1)), Some(c!(i (-0.5))));
    }

    #[test]
    fn adjoint_is_function_conjugate() {
        // sin and cos are real-valued, so they are their own adjoints even
        // though coefficient-only conjugation negates sin
        let sin = TrigPolynomial::sin('x', 1);
        let cos = TrigPolynomial::cos('x', 1);
        assert!(TrigPolynomial::equivalent(&sin.adjoint(), &sin, None));
        assert!(TrigPolynomial::equivalent(&cos.adjoint(), &cos, None));
        assert!(TrigPolynomial::equivalent(&sin.conj(), &-sin.clone(), None));
    }

    #[test]
    fn equivalent_values_requires_keys() {
        let p = TrigPolynomial::cos('x', 1);
        let q = TrigPolynomial::cos('y', 1);
        assert_eq!(
            TrigPolynomial::equivalent_values(&p, &q, None),
            Err(MismatchedSupport),
        );
        assert!(!TrigPolynomial::equivalent(&p, &q, None));
        assert_eq!(TrigPolynomial::equivalent_values(&p, &p, None), Ok(true));
    }

    #[test]
    fn convolution() {
        // cos(x)·cos(x) = ¼ e^{2ix} + ½ + ¼ e^{-2ix}
        let p = TrigPolynomial::cos('x', 1);
        let sq = &p * &p;
        assert_eq!(sq.coefficient(&var('x', 2)), Some(c!(0.25)));
        assert_eq!(sq.coefficient(&TrigMonomial::one()), Some(c!(0.5)));
        assert_eq!(sq.coefficient(&var('x', -2)), Some(c!(0.25)));
    }
}
