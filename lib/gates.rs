//! Catalogue of standard one- and two-qubit gates with exact polynomial
//! entries.
//!
//! Fixed gates carry constant coefficients; the rotation gates `rx`, `ry`,
//! and `rz` take a single angle symbol and produce entries that are exact
//! trigonometric polynomials in that symbol, not floating approximations.
//!
//! Two-qubit gates follow the crate's bit convention: the first qubit of the
//! placement tuple is the least significant local bit, and for the
//! controlled gates it is the control.

use std::f64::consts::FRAC_1_SQRT_2;
use crate::{
    c,
    circuit::Gate,
    monomial::TrigMonomial,
    polynomial::TrigPolynomial,
    tensor::TrigTensor,
};

// all matrices here are fixed-size constants, so construction cannot fail
fn build<const N: usize>(
    nqubit: usize,
    elems: [TrigPolynomial; N],
    labels: &[&str],
) -> Gate {
    let dim = 1_usize << nqubit;
    let matrix = TrigTensor::from_elems(&[dim, dim], elems)
        .expect("catalogue matrix shape");
    Gate::new(nqubit, matrix, labels.iter().copied())
        .expect("catalogue gate arity")
}

fn zero() -> TrigPolynomial { TrigPolynomial::zero() }

fn one() -> TrigPolynomial { TrigPolynomial::one() }

/// The single-qubit identity gate.
pub fn i() -> Gate {
    build(1, [one(), zero(), zero(), one()], &["I"])
}

/// The Pauli X gate.
pub fn x() -> Gate {
    build(1, [zero(), one(), one(), zero()], &["X"])
}

/// The Pauli Y gate.
pub fn y() -> Gate {
    build(
        1,
        [
            zero(),
            one() * c!(i (-1.0)),
            one() * c!(i 1.0),
            zero(),
        ],
        &["Y"],
    )
}

/// The Pauli Z gate.
pub fn z() -> Gate {
    build(1, [one(), zero(), zero(), one() * c!(-1.0)], &["Z"])
}

/// The Hadamard gate.
pub fn h() -> Gate {
    let p = one() * c!(FRAC_1_SQRT_2);
    build(1, [p.clone(), p.clone(), p.clone(), -p], &["H"])
}

/// The rotation about *x* by the angle named `symbol`:
/// `[[cos θ, -i sin θ], [-i sin θ, cos θ]]`.
pub fn rx(symbol: char) -> Gate {
    let cos = TrigPolynomial::cos(symbol, 1);
    let isin = TrigPolynomial::sin(symbol, 1) * c!(i (-1.0));
    build(1, [cos.clone(), isin.clone(), isin, cos], &["Rx"])
}

/// The rotation about *y* by the angle named `symbol`:
/// `[[cos θ, -sin θ], [sin θ, cos θ]]`.
pub fn ry(symbol: char) -> Gate {
    let cos = TrigPolynomial::cos(symbol, 1);
    let sin = TrigPolynomial::sin(symbol, 1);
    build(1, [cos.clone(), -sin.clone(), sin, cos], &["Ry"])
}

/// The rotation about *z* by the angle named `symbol`:
/// `diag(exp(-iθ), exp(+iθ))`, expressed as bare monomial terms.
pub fn rz(symbol: char) -> Gate {
    let minus = TrigPolynomial::new([
        (TrigMonomial::var(symbol, -1).expect("nonzero order"), c!(1.0)),
    ]);
    let plus = TrigPolynomial::new([
        (TrigMonomial::var(symbol, 1).expect("nonzero order"), c!(1.0)),
    ]);
    build(1, [minus, zero(), zero(), plus], &["Rz"])
}

/// The controlled-X gate; the first tuple qubit is the control.
pub fn cx() -> Gate {
    build(
        2,
        [
            one(),  zero(), zero(), zero(),
            zero(), zero(), zero(), one(),
            zero(), zero(), one(),  zero(),
            zero(), one(),  zero(), zero(),
        ],
        &["@", "X"],
    )
}

/// The controlled-Z gate; symmetric in its two qubits.
pub fn cz() -> Gate {
    build(
        2,
        [
            one(),  zero(), zero(), zero(),
            zero(), one(),  zero(), zero(),
            zero(), zero(), one(),  zero(),
            zero(), zero(), zero(), one() * c!(-1.0),
        ],
        &["@", "Z"],
    )
}

/// The swap gate.
pub fn swap() -> Gate {
    build(
        2,
        [
            one(),  zero(), zero(), zero(),
            zero(), zero(), one(),  zero(),
            zero(), one(),  zero(), zero(),
            zero(), zero(), zero(), one(),
        ],
        &["X", "X"],
    )
}
