//! Exact symbolic unitaries for parameterized quantum circuits.
//!
//! Gate entries are represented not as floating-point numbers but as
//! closed-form trigonometric expressions in named angle parameters, so that
//! downstream tools (optimizers, equivalence checkers) can reason about
//! circuits algebraically rather than at fixed parameter values.
//!
//! - [`monomial`] implements the canonical symbolic basis terms
//!   exp(*i* Σ *k θ*) over named angle variables.
//! - [`polynomial`] implements sparse, exact complex-weighted sums of those
//!   terms with full arithmetic and tolerance-based equivalence checking.
//! - [`tensor`] provides a dense N-dimensional container of polynomial
//!   entries with elementwise and matrix-product operations.
//! - [`circuit`] schedules validated [`Gate`][circuit::Gate]s on a time/qubit
//!   grid and composes them into the full-circuit symbolic unitary.
//! - [`gates`] is a catalogue of standard one- and two-qubit gates with exact
//!   polynomial entries.
//!
//! ```
//! use autogate::{ circuit::Circuit, gates, polynomial::TrigPolynomial };
//!
//! // a single Ry(θ) on one qubit
//! let mut circuit = Circuit::new();
//! circuit.add_gate(0, [0], gates::ry('θ')).unwrap();
//!
//! let u = circuit.matrix();
//! assert!(TrigPolynomial::equivalent(
//!     u.get(&[0, 0]).unwrap(),
//!     &TrigPolynomial::cos('θ', 1),
//!     None,
//! ));
//! ```

pub mod monomial;
pub mod polynomial;
pub mod tensor;
pub mod circuit;
pub mod gates;

pub extern crate num_complex;
/// Handy macro to create `num_complex::Complex64`s from more natural and
/// succinct syntax.
///
/// ```
/// use autogate::c;
/// use num_complex::Complex64;
///
/// assert_eq!( c!(i (-1.0)), Complex64::new(0.0, -1.0) );
/// assert_eq!( c!(1.0),      Complex64::new(1.0, 0.0)  );
/// assert_eq!( c!(0.5, 0.5), Complex64::new(0.5, 0.5)  );
/// ```
#[macro_export]
macro_rules! c {
    ( i $im:expr )
        => { $crate::num_complex::Complex64::new(0.0, $im) };
    ( $re:expr )
        => { $crate::num_complex::Complex64::new($re, 0.0) };
    ( $re:expr, $im:expr )
        => { $crate::num_complex::Complex64::new($re, $im) };
}
