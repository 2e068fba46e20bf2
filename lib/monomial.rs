//! Canonical symbolic basis terms over named angle variables.
//!
//! A [`TrigMonomial`] represents the product exp(*i* Σ *k θ*) over a set of
//! distinct angle symbols *θ* with nonzero integer orders *k*. Monomials are
//! stored in a canonical sorted form so that identical symbolic terms always
//! compare equal and collide as map keys, regardless of how they were built.

use itertools::{ EitherOrBoth, Itertools };
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonomialError {
    #[error("variables must be sorted by symbol")]
    Unsorted,

    #[error("zero order not permitted")]
    ZeroOrder,

    #[error("duplicate symbols not permitted")]
    DuplicateSymbol,
}
pub type MonomialResult<T> = Result<T, MonomialError>;
use MonomialError::*;

/// A canonical product of angle-variable powers, exp(*i* Σ *k θ*).
///
/// Variables are held as `(symbol, order)` pairs, strictly increasing by
/// symbol, with no zero orders; the empty list is the identity term. The
/// derived total order is lexicographic on that list and exists only to give
/// polynomials a canonical storage key — it carries no algebraic meaning.
///
/// ```
/// use autogate::monomial::TrigMonomial;
///
/// let ab = TrigMonomial::new([('a', 1), ('b', -2)]).unwrap();
/// assert_eq!( &ab * &ab.conj(), TrigMonomial::one() );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrigMonomial {
    vars: Vec<(char, i32)>,
}

impl TrigMonomial {
    /// Construct a new `TrigMonomial` from `(symbol, order)` pairs.
    ///
    /// The pairs must be sorted by symbol, with no duplicate symbols and no
    /// zero orders.
    pub fn new<I>(vars: I) -> MonomialResult<Self>
    where I: IntoIterator<Item = (char, i32)>
    {
        let vars: Vec<(char, i32)> = vars.into_iter().collect();
        if vars.windows(2).any(|w| w[0].0 > w[1].0) { return Err(Unsorted); }
        if vars.iter().any(|(_, order)| *order == 0) { return Err(ZeroOrder); }
        if vars.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(DuplicateSymbol);
        }
        Ok(Self { vars })
    }

    /// Construct the single-variable monomial exp(*i* `order` `symbol`).
    ///
    /// Fails if `order` is zero.
    pub fn var(symbol: char, order: i32) -> MonomialResult<Self> {
        if order == 0 { return Err(ZeroOrder); }
        Ok(Self { vars: vec![(symbol, order)] })
    }

    /// Return the identity monomial (empty variable list).
    pub fn one() -> Self { Self { vars: Vec::new() } }

    /// Return `true` if `self` is the identity monomial.
    pub fn is_one(&self) -> bool { self.vars.is_empty() }

    /// Return the `(symbol, order)` pairs of `self`.
    pub fn vars(&self) -> &[(char, i32)] { &self.vars }

    /// Return the complex conjugate of `self`, negating every order.
    ///
    /// Symbols are unchanged, so the result satisfies the canonical-form
    /// invariant by construction.
    pub fn conj(&self) -> Self {
        let vars: Vec<(char, i32)> =
            self.vars.iter().map(|(symbol, order)| (*symbol, -order))
            .collect();
        Self { vars }
    }
}

/// Monomial multiplication is a merge of the two sorted variable lists:
/// variables present in only one operand pass through, while shared symbols
/// have their orders summed and are dropped entirely when the sum is zero.
/// Cancellation here is the sole normalization rule of the whole algebra.
impl std::ops::Mul<&TrigMonomial> for &TrigMonomial {
    type Output = TrigMonomial;

    fn mul(self, rhs: &TrigMonomial) -> Self::Output {
        let vars: Vec<(char, i32)> =
            self.vars.iter().copied()
            .merge_join_by(rhs.vars.iter().copied(), |l, r| l.0.cmp(&r.0))
            .filter_map(|pair| match pair {
                EitherOrBoth::Left(v) | EitherOrBoth::Right(v) => Some(v),
                EitherOrBoth::Both((symbol, a), (_, b)) =>
                    (a + b != 0).then_some((symbol, a + b)),
            })
            .collect();
        TrigMonomial { vars }
    }
}

impl std::ops::Mul<TrigMonomial> for TrigMonomial {
    type Output = TrigMonomial;

    fn mul(self, rhs: TrigMonomial) -> Self::Output { &self * &rhs }
}

impl std::fmt::Display for TrigMonomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.vars.is_empty() { return write!(f, "1"); }
        write!(f, "exp(i*(")?;
        for (symbol, order) in self.vars.iter() {
            write!(f, "{:+}{}", order, symbol)?;
        }
        write!(f, "))")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mono(vars: &[(char, i32)]) -> TrigMonomial {
        TrigMonomial::new(vars.iter().copied()).unwrap()
    }

    #[test]
    fn init() {
        assert!(TrigMonomial::new([]).is_ok());
        assert!(TrigMonomial::new([('a', 1)]).is_ok());
        assert!(TrigMonomial::new([('a', -3), ('b', 2)]).is_ok());
        assert_eq!(TrigMonomial::new([('b', 1), ('a', 1)]), Err(Unsorted));
        assert_eq!(TrigMonomial::new([('a', 0)]), Err(ZeroOrder));
        assert_eq!(TrigMonomial::new([('a', 1), ('a', 2)]), Err(DuplicateSymbol));
        assert_eq!(TrigMonomial::var('x', 0), Err(ZeroOrder));
    }

    #[test]
    fn mul_commutes() {
        let a = mono(&[('a', 1), ('c', 2)]);
        let b = mono(&[('b', -1), ('c', 1)]);
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&a * &b, mono(&[('a', 1), ('b', -1), ('c', 3)]));
    }

    #[test]
    fn mul_identity() {
        let a = mono(&[('a', 2), ('z', -1)]);
        assert_eq!(&a * &TrigMonomial::one(), a);
        assert_eq!(&TrigMonomial::one() * &a, a);
        assert_eq!(
            TrigMonomial::one() * TrigMonomial::one(),
            TrigMonomial::one(),
        );
    }

    #[test]
    fn mul_cancels() {
        let a = mono(&[('a', 1), ('b', -2)]);
        assert_eq!(&a * &a.conj(), TrigMonomial::one());
        let b = mono(&[('a', -1)]);
        assert_eq!(&a * &b, mono(&[('b', -2)]));
    }

    #[test]
    fn conj() {
        let a = mono(&[('a', 1), ('b', -2)]);
        assert_eq!(a.conj(), mono(&[('a', -1), ('b', 2)]));
        assert_eq!(a.conj().conj(), a);
        assert_eq!(TrigMonomial::one().conj(), TrigMonomial::one());
    }

    #[test]
    fn ord_is_structural() {
        let a = mono(&[('a', 1)]);
        let b = mono(&[('a', 1), ('b', 1)]);
        assert!(TrigMonomial::one() < a);
        assert!(a < b);
    }
}
