//! Dense N-dimensional tensors of [`TrigPolynomial`] entries.
//!
//! A [`TrigTensor`] couples an ordered shape with a row-major array of
//! polynomial entries. Arithmetic operators have value semantics; entries are
//! independently assignable in place for construction. The only
//! non-elementwise operation is [`gemm`][TrigTensor::gemm], standard matrix
//! multiplication over the polynomial ring.

use ndarray::{ self as nd, Dimension };
use num_complex::Complex64 as C64;
use thiserror::Error;
use crate::polynomial::TrigPolynomial;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TensorError {
    #[error("tensors are not the same shape: {0:?} != {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    #[error("element count {0} does not match shape {1:?}")]
    ElementCount(usize, Vec<usize>),

    #[error("matrix multiplication is defined only for square 2-D tensors: {0:?}")]
    NonSquare(Vec<usize>),
}
pub type TensorResult<T> = Result<T, TensorError>;
use TensorError::*;

/// A dense tensor of symbolic trigonometric polynomials.
///
/// ```
/// use autogate::{ tensor::TrigTensor, polynomial::TrigPolynomial };
///
/// let mut t = TrigTensor::new(&[2, 2]);
/// *t.get_mut(&[0, 1]).unwrap() = TrigPolynomial::cos('x', 1);
/// assert_eq!( t.shape(), &[2, 2] );
/// assert_eq!( t.get(&[0, 0]), Some(&TrigPolynomial::zero()) );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TrigTensor {
    data: nd::ArrayD<TrigPolynomial>,
}

impl TrigTensor {
    /// Create a new `TrigTensor` of the given shape with all entries set to
    /// the zero polynomial.
    pub fn new(shape: &[usize]) -> Self {
        Self {
            data: nd::ArrayD::from_elem(nd::IxDyn(shape), TrigPolynomial::zero()),
        }
    }

    /// Create a new `TrigTensor` from a row-major list of entries.
    ///
    /// Fails if the number of entries does not equal the product of the
    /// dimensions.
    pub fn from_elems<I>(shape: &[usize], elems: I) -> TensorResult<Self>
    where I: IntoIterator<Item = TrigPolynomial>
    {
        let elems: Vec<TrigPolynomial> = elems.into_iter().collect();
        let n = elems.len();
        let data =
            nd::ArrayD::from_shape_vec(nd::IxDyn(shape), elems)
            .map_err(|_| ElementCount(n, shape.to_vec()))?;
        Ok(Self { data })
    }

    /// Create the `dim × dim` identity matrix, with the unit polynomial on
    /// the diagonal and zero elsewhere.
    pub fn identity(dim: usize) -> Self {
        let mut out = Self::new(&[dim, dim]);
        for i in 0..dim {
            out.data[[i, i]] = TrigPolynomial::one();
        }
        out
    }

    /// Return the shape of `self`.
    pub fn shape(&self) -> &[usize] { self.data.shape() }

    /// Return the number of dimensions.
    pub fn ndim(&self) -> usize { self.data.ndim() }

    /// Return the total number of entries.
    pub fn size(&self) -> usize { self.data.len() }

    /// Return a reference to the entry at `index`, or `None` if it is out of
    /// bounds.
    pub fn get(&self, index: &[usize]) -> Option<&TrigPolynomial> {
        self.data.get(index)
    }

    /// Return a mutable reference to the entry at `index`, or `None` if it is
    /// out of bounds.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut TrigPolynomial> {
        self.data.get_mut(index)
    }

    /// Return a reference to the backing array.
    pub fn as_array(&self) -> &nd::ArrayD<TrigPolynomial> { &self.data }

    /// Return a mutable reference to the backing array.
    pub fn as_array_mut(&mut self) -> &mut nd::ArrayD<TrigPolynomial> {
        &mut self.data
    }

    fn check_same_shape(&self, other: &Self) -> TensorResult<()> {
        if self.shape() != other.shape() {
            return Err(ShapeMismatch(
                self.shape().to_vec(),
                other.shape().to_vec(),
            ));
        }
        Ok(())
    }

    /// Elementwise sum. Fails on mismatched shapes.
    pub fn checked_add(&self, other: &Self) -> TensorResult<Self> {
        self.check_same_shape(other)?;
        let data =
            nd::Zip::from(&self.data).and(&other.data)
            .map_collect(|a, b| a + b);
        Ok(Self { data })
    }

    /// Elementwise difference. Fails on mismatched shapes.
    pub fn checked_sub(&self, other: &Self) -> TensorResult<Self> {
        self.check_same_shape(other)?;
        let data =
            nd::Zip::from(&self.data).and(&other.data)
            .map_collect(|a, b| a - b);
        Ok(Self { data })
    }

    /// Elementwise (Hadamard) product. Fails on mismatched shapes.
    pub fn checked_hadamard(&self, other: &Self) -> TensorResult<Self> {
        self.check_same_shape(other)?;
        let data =
            nd::Zip::from(&self.data).and(&other.data)
            .map_collect(|a, b| a * b);
        Ok(Self { data })
    }

    /// Standard matrix multiplication, `out[i, j] = Σ_k a[i, k] b[k, j]`,
    /// over the polynomial ring.
    ///
    /// Defined only for two square 2-D tensors of the same dimension; this is
    /// the one non-elementwise operation and by far the most expensive, at
    /// `O(d³)` polynomial multiply-accumulates.
    pub fn gemm(a: &Self, b: &Self) -> TensorResult<Self> {
        a.check_same_shape(b)?;
        if a.ndim() != 2 || a.shape()[0] != a.shape()[1] {
            return Err(NonSquare(a.shape().to_vec()));
        }
        let dim = a.shape()[0];
        let mut out = Self::new(&[dim, dim]);
        for i in 0..dim {
            for j in 0..dim {
                let mut acc = TrigPolynomial::zero();
                for k in 0..dim {
                    acc += &(&a.data[[i, k]] * &b.data[[k, j]]);
                }
                out.data[[i, j]] = acc;
            }
        }
        Ok(out)
    }

    /// Return the elementwise complex conjugate of `self`.
    ///
    /// Entries are conjugated as functions (via
    /// [`TrigPolynomial::adjoint`]), so that [`dagger`][Self::dagger] is the
    /// true operator adjoint.
    pub fn conj(&self) -> Self {
        Self { data: self.data.map(|entry| entry.adjoint()) }
    }

    /// Return `self` with its axes reversed (the matrix transpose for 2-D
    /// tensors).
    pub fn t(&self) -> Self {
        Self { data: self.data.t().to_owned() }
    }

    /// Return the conjugate transpose of `self`.
    pub fn dagger(&self) -> Self { self.t().conj() }

    /// Return a copy of `self` with every entry
    /// [sieved][TrigPolynomial::sieved] at `cutoff`.
    pub fn sieved(&self, cutoff: Option<f64>) -> Self {
        Self { data: self.data.map(|entry| entry.sieved(cutoff)) }
    }

    /// Return `true` if `a` and `b` have the same shape and every pair of
    /// corresponding entries is [equivalent][TrigPolynomial::equivalent] at
    /// `cutoff`.
    pub fn equivalent(a: &Self, b: &Self, cutoff: Option<f64>) -> bool {
        a.shape() == b.shape()
            && a.data.iter().zip(b.data.iter())
                .all(|(pa, pb)| TrigPolynomial::equivalent(pa, pb, cutoff))
    }
}

impl std::ops::Neg for &TrigTensor {
    type Output = TrigTensor;

    fn neg(self) -> Self::Output {
        TrigTensor { data: self.data.map(|entry| -entry) }
    }
}

impl std::ops::Neg for TrigTensor {
    type Output = TrigTensor;

    fn neg(self) -> Self::Output { -&self }
}

macro_rules! impl_elementwise_tensor {
    ( $trait:ident, $fun:ident, $checked:ident ) => {
        /// *Panics on mismatched shapes*; see the `checked_` methods for the
        /// fallible forms.
        impl std::ops::$trait<&TrigTensor> for &TrigTensor {
            type Output = TrigTensor;

            fn $fun(self, rhs: &TrigTensor) -> Self::Output {
                self.$checked(rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        /// *Panics on mismatched shapes*; see the `checked_` methods for the
        /// fallible forms.
        impl std::ops::$trait<TrigTensor> for TrigTensor {
            type Output = TrigTensor;

            fn $fun(self, rhs: TrigTensor) -> Self::Output {
                self.$checked(&rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }
    }
}
impl_elementwise_tensor!(Add, add, checked_add);
impl_elementwise_tensor!(Sub, sub, checked_sub);
impl_elementwise_tensor!(Mul, mul, checked_hadamard);

macro_rules! impl_scalar_tensor {
    ( $trait:ident, $fun:ident, $op:tt ) => {
        impl std::ops::$trait<C64> for &TrigTensor {
            type Output = TrigTensor;

            fn $fun(self, rhs: C64) -> Self::Output {
                TrigTensor { data: self.data.map(|entry| entry $op rhs) }
            }
        }

        impl std::ops::$trait<C64> for TrigTensor {
            type Output = TrigTensor;

            fn $fun(self, rhs: C64) -> Self::Output { &self $op rhs }
        }
    }
}
impl_scalar_tensor!(Add, add, +);
impl_scalar_tensor!(Sub, sub, -);
impl_scalar_tensor!(Mul, mul, *);
impl_scalar_tensor!(Div, div, /);

impl std::ops::Add<TrigTensor> for C64 {
    type Output = TrigTensor;

    fn add(self, rhs: TrigTensor) -> Self::Output { rhs + self }
}

impl std::ops::Sub<TrigTensor> for C64 {
    type Output = TrigTensor;

    fn sub(self, rhs: TrigTensor) -> Self::Output { -rhs + self }
}

impl std::ops::Mul<TrigTensor> for C64 {
    type Output = TrigTensor;

    fn mul(self, rhs: TrigTensor) -> Self::Output { rhs * self }
}

impl std::fmt::Display for TrigTensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "shape {:?}", self.shape())?;
        for (index, entry) in self.data.indexed_iter() {
            writeln!(f, "[{:?}]", index.slice())?;
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
