//! Time/qubit schedules of gates and their composed symbolic unitaries.
//!
//! A [`Circuit`] is a sparse mapping from a placement key — a time index and
//! an ordered tuple of qubit indices — to a [`Gate`]. Insertion is validated
//! so that no two gates ever claim the same qubit at the same time;
//! [`matrix`][Circuit::matrix] then produces the exact full-space unitary of
//! the whole schedule by embedding each gate's local operator into the
//! `2^N`-dimensional space and folding the embedded operators together in
//! ascending time order.
//!
//! Bit convention: circuit qubit *q* corresponds to bit *q* of a
//! computational-basis index (qubit 0 is the least significant bit), and
//! qubit *j* of a gate's placement tuple corresponds to bit *j* of the gate's
//! local row/column indices.

use std::collections::{ BTreeMap, BTreeSet };
use rustc_hash::FxHashSet;
use thiserror::Error;
use crate::tensor::TrigTensor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("gate matrix shape {0:?} is not (2^{1}, 2^{1})")]
    GateShape(Vec<usize>, usize),

    #[error("gate has {0} label(s) for {1} qubit(s)")]
    GateLabels(usize, usize),

    #[error("placement names {0} qubit(s), but the gate acts on {1}")]
    PlacementArity(usize, usize),

    #[error("repeated qubit index {0} in placement")]
    RepeatedQubit(usize),

    #[error("(time {0}, qubit {1}) is already occupied")]
    SlotOccupied(usize, usize),
}
pub type CircuitResult<T> = Result<T, CircuitError>;
use CircuitError::*;

/// A validated unitary operator over a fixed small number of qubits,
/// expressed symbolically.
///
/// Construction checks that the matrix is square with dimension `2^nqubit`
/// and that there is exactly one display label per qubit.
#[derive(Clone, Debug)]
pub struct Gate {
    nqubit: usize,
    matrix: TrigTensor,
    labels: Vec<String>,
}

impl Gate {
    /// Construct a new `Gate` from its qubit count, its operator in the
    /// computational basis, and one display label per qubit.
    pub fn new<I, S>(nqubit: usize, matrix: TrigTensor, labels: I)
        -> CircuitResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> =
            labels.into_iter().map(|label| label.into()).collect();
        let dim = 1_usize << nqubit;
        if matrix.shape() != [dim, dim] {
            return Err(GateShape(matrix.shape().to_vec(), nqubit));
        }
        if labels.len() != nqubit {
            return Err(GateLabels(labels.len(), nqubit));
        }
        Ok(Self { nqubit, matrix, labels })
    }

    /// Return the number of qubits the gate acts on.
    pub fn nqubit(&self) -> usize { self.nqubit }

    /// Return the gate's operator in the computational basis.
    pub fn matrix(&self) -> &TrigTensor { &self.matrix }

    /// Return the gate's display labels, one per qubit.
    pub fn labels(&self) -> &[String] { &self.labels }
}

// scatter the low bits of `bits` into the named bit positions
fn scatter(bits: usize, positions: &[usize]) -> usize {
    positions.iter().enumerate()
        .fold(0, |acc, (j, p)| acc | (((bits >> j) & 1) << p))
}

/// A sparse schedule of [`Gate`]s on a time/qubit grid.
///
/// The schedule is keyed by `(time, qubit tuple)` and visited in ascending
/// key order, so gates at smaller times are applied first regardless of
/// insertion order. Derived views (occupied qubits, occupied times, the
/// (time, qubit) occupancy set) are maintained on insertion; nothing is
/// cached across calls to [`matrix`][Self::matrix].
///
/// ```
/// use autogate::{ circuit::Circuit, gates };
///
/// let mut circuit = Circuit::new();
/// circuit.add_gate(0, [0], gates::h()).unwrap();
/// circuit.add_gate(1, [0, 1], gates::cx()).unwrap();
/// assert_eq!( circuit.nqubit(), 2 );
/// assert_eq!( circuit.matrix().shape(), &[4, 4] );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Circuit {
    gates: BTreeMap<(usize, Vec<usize>), Gate>,
    qubits: BTreeSet<usize>,
    times: BTreeSet<usize>,
    occupied: FxHashSet<(usize, usize)>,
}

impl Circuit {
    /// Create a new, empty `Circuit`.
    pub fn new() -> Self { Self::default() }

    /// Return the schedule as a map from `(time, qubit tuple)` to gate, in
    /// ascending key order.
    pub fn gates(&self) -> &BTreeMap<(usize, Vec<usize>), Gate> {
        &self.gates
    }

    /// Return the set of occupied qubit indices.
    pub fn qubits(&self) -> &BTreeSet<usize> { &self.qubits }

    /// Return the set of occupied time indices.
    pub fn times(&self) -> &BTreeSet<usize> { &self.times }

    /// Return the set of occupied `(time, qubit)` pairs.
    pub fn times_and_qubits(&self) -> &FxHashSet<(usize, usize)> {
        &self.occupied
    }

    /// Return the maximum occupied qubit index, if any.
    pub fn max_qubit(&self) -> Option<usize> {
        self.qubits.last().copied()
    }

    /// Return the maximum occupied time index, if any.
    pub fn max_time(&self) -> Option<usize> {
        self.times.last().copied()
    }

    /// Return the total number of qubit indices addressed by the circuit,
    /// including unoccupied gaps.
    pub fn nqubit(&self) -> usize {
        self.max_qubit().map_or(0, |q| q + 1)
    }

    /// Return the total number of time indices addressed by the circuit,
    /// including unoccupied gaps.
    pub fn ntime(&self) -> usize {
        self.max_time().map_or(0, |t| t + 1)
    }

    /// Return the number of occupied qubit indices, excluding gaps.
    pub fn nqubit_sparse(&self) -> usize { self.qubits.len() }

    /// Return the number of occupied time indices, excluding gaps.
    pub fn ntime_sparse(&self) -> usize { self.times.len() }

    /// Return the total number of gates in the circuit.
    pub fn ngate(&self) -> usize { self.gates.len() }

    /// Return the number of gates acting on exactly `nqubit` qubits.
    pub fn ngate_nqubit(&self, nqubit: usize) -> usize {
        self.gates.values()
            .filter(|gate| gate.nqubit() == nqubit)
            .count()
    }

    /// Return the number of one-qubit gates in the circuit.
    pub fn ngate1(&self) -> usize { self.ngate_nqubit(1) }

    /// Return the number of two-qubit gates in the circuit.
    pub fn ngate2(&self) -> usize { self.ngate_nqubit(2) }

    /// Place `gate` at time `time` on the ordered qubit tuple `qubits`.
    ///
    /// Fails, leaving the circuit unchanged, if the tuple length does not
    /// match the gate's qubit count, if the tuple repeats a qubit, or if any
    /// `(time, qubit)` slot named by the placement is already occupied.
    pub fn add_gate<I>(&mut self, time: usize, qubits: I, gate: Gate)
        -> CircuitResult<()>
    where I: IntoIterator<Item = usize>
    {
        let qubits: Vec<usize> = qubits.into_iter().collect();
        if qubits.len() != gate.nqubit() {
            return Err(PlacementArity(qubits.len(), gate.nqubit()));
        }
        for (k, qubit) in qubits.iter().enumerate() {
            if qubits[..k].contains(qubit) {
                return Err(RepeatedQubit(*qubit));
            }
        }
        for qubit in qubits.iter() {
            if self.occupied.contains(&(time, *qubit)) {
                return Err(SlotOccupied(time, *qubit));
            }
        }
        self.times.insert(time);
        for qubit in qubits.iter() {
            self.qubits.insert(*qubit);
            self.occupied.insert((time, *qubit));
        }
        self.gates.insert((time, qubits), gate);
        Ok(())
    }

    // lift `gate`'s local operator into the full `2^nqubit` space by
    // bit-scattering: untouched qubits form an identity block diagonal over
    // every value of `k`, while the touched qubits contribute the gate's own
    // entries at the positions their bit interleaving maps to
    fn embedded(gate: &Gate, qubits: &[usize], nqubit: usize) -> TrigTensor {
        let q = gate.nqubit();
        let dim = 1_usize << nqubit;
        let others: Vec<usize> =
            (0..nqubit).filter(|k| !qubits.contains(k)).collect();
        let mut out = TrigTensor::new(&[dim, dim]);
        for k in 0..1_usize << others.len() {
            let base = scatter(k, &others);
            for l in 0..1_usize << q {
                let row = base + scatter(l, qubits);
                for m in 0..1_usize << q {
                    let col = base + scatter(m, qubits);
                    out.as_array_mut()[[row, col]] =
                        gate.matrix().as_array()[[l, m]].clone();
                }
            }
        }
        out
    }

    /// Compute the full-space symbolic unitary of the whole circuit.
    ///
    /// The result has shape `(2^N, 2^N)` for `N = self.nqubit()`. Gates are
    /// folded in ascending time order by left-multiplication, so gates at
    /// smaller times end up as the rightmost factors in the conventional
    /// operator ordering (applied first to a state vector). An empty circuit
    /// yields the identity; unoccupied qubit indices below `max_qubit` are
    /// acted on by implicit identity.
    ///
    /// Nothing is cached: every call recomputes from the schedule. Cost
    /// scales as `O(G · 2^N · 2^q · P)` for `G` gates of arity `q` and
    /// polynomial multiply cost `P`, so callers must bound `N` themselves.
    pub fn matrix(&self) -> TrigTensor {
        let nqubit = self.nqubit();
        let dim = 1_usize << nqubit;
        let mut acc = TrigTensor::identity(dim);
        for ((_, qubits), gate) in self.gates.iter() {
            let emb = Self::embedded(gate, qubits, nqubit);
            acc = TrigTensor::gemm(&emb, &acc)
                .expect("embedded operator matches circuit dimension");
        }
        acc
    }

    /// Render an ASCII diagram of the circuit: a time ruler, one wire row per
    /// qubit, gate labels at their time columns, and vertical connectors
    /// across each multi-qubit gate's span.
    pub fn ascii_diagram(&self) -> String {
        let nqubit = self.nqubit();
        let ntime = self.ntime();
        let mut widths: Vec<usize> =
            (0..ntime).map(|t| t.to_string().len()).collect();
        for ((time, _), gate) in self.gates.iter() {
            let w =
                gate.labels().iter().map(|label| label.len()).max()
                .unwrap_or(1);
            widths[*time] = widths[*time].max(w);
        }
        let starts: Vec<usize> =
            widths.iter()
            .scan(0, |acc, w| { let s = *acc; *acc += w + 1; Some(s) })
            .collect();
        let total: usize = widths.iter().map(|w| w + 1).sum();

        let mut wires = vec![vec!['-'; total]; nqubit];
        let mut joins = vec![vec![' '; total]; nqubit];
        for ((time, qubits), gate) in self.gates.iter() {
            let start = starts[*time];
            let min_q = *qubits.iter().min().unwrap_or(&0);
            let max_q = *qubits.iter().max().unwrap_or(&0);
            for wire in wires.iter_mut().take(max_q + 1).skip(min_q) {
                wire[start] = '|';
            }
            for join in joins.iter_mut().take(max_q).skip(min_q) {
                join[start] = '|';
            }
            for (qubit, label) in qubits.iter().zip(gate.labels()) {
                for (k, ch) in label.chars().enumerate() {
                    wires[*qubit][start + k] = ch;
                }
            }
        }

        let time_str: String =
            (0..ntime)
            .map(|t| format!("{:<1$}|", t, widths[t]))
            .collect();
        let qw = nqubit.saturating_sub(1).to_string().len();
        let mut out = String::new();
        out.push_str(&format!("T{:qw$} : |{}\n", "", time_str));
        out.push('\n');
        for (qubit, wire) in wires.iter().enumerate() {
            let wire_str: String = wire.iter().collect();
            let join_str: String = joins[qubit].iter().collect();
            out.push_str(&format!("q{:<qw$} : -{}\n", qubit, wire_str));
            out.push_str(&format!(" {:qw$}    {}\n", "", join_str));
        }
        out.push_str(&format!("T{:qw$} : |{}\n", "", time_str));
        out
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ascii_diagram())
    }
}

#[cfg(test)]
mod test {
    use crate::{ c, gates, polynomial::TrigPolynomial };
    use super::*;

    #[test]
    fn gate_validation() {
        let matrix = TrigTensor::identity(2);
        assert!(Gate::new(1, matrix.clone(), ["I"]).is_ok());
        assert_eq!(
            Gate::new(2, matrix.clone(), ["I", "I"]).unwrap_err(),
            GateShape(vec![2, 2], 2),
        );
        assert_eq!(
            Gate::new(1, matrix, ["I", "I"]).unwrap_err(),
            GateLabels(2, 1),
        );
    }

    #[test]
    fn placement_validation() {
        let mut circuit = Circuit::new();
        assert_eq!(
            circuit.add_gate(0, [0, 1], gates::i()).unwrap_err(),
            PlacementArity(2, 1),
        );
        assert_eq!(
            circuit.add_gate(0, [3, 3], gates::cx()).unwrap_err(),
            RepeatedQubit(3),
        );
        assert_eq!(circuit.ngate(), 0);
    }

    #[test]
    fn occupied_slot_rejected() {
        let mut circuit = Circuit::new();
        circuit.add_gate(0, [0], gates::i()).unwrap();
        let before = circuit.matrix();
        assert_eq!(
            circuit.add_gate(0, [0], gates::x()).unwrap_err(),
            SlotOccupied(0, 0),
        );
        // the rejected insertion left the circuit unchanged
        assert_eq!(circuit.ngate(), 1);
        assert!(TrigTensor::equivalent(&circuit.matrix(), &before, None));
        // a two-qubit gate overlapping one occupied slot is also rejected
        assert_eq!(
            circuit.add_gate(0, [1, 0], gates::cx()).unwrap_err(),
            SlotOccupied(0, 0),
        );
        assert_eq!(circuit.nqubit(), 1);
    }

    #[test]
    fn empty_matrix_is_identity() {
        let circuit = Circuit::new();
        let u = circuit.matrix();
        assert_eq!(u.shape(), &[1, 1]);
        assert_eq!(u.get(&[0, 0]), Some(&TrigPolynomial::one()));
    }

    #[test]
    fn single_i_gate() {
        let mut circuit = Circuit::new();
        circuit.add_gate(0, [0], gates::i()).unwrap();
        let u = circuit.matrix();
        assert_eq!(u.shape(), &[2, 2]);
        assert_eq!(u.get(&[0, 0]), Some(&TrigPolynomial::one()));
        assert_eq!(u.get(&[0, 1]), Some(&TrigPolynomial::zero()));
        assert_eq!(u.get(&[1, 0]), Some(&TrigPolynomial::zero()));
        assert_eq!(u.get(&[1, 1]), Some(&TrigPolynomial::one()));
    }

    #[test]
    fn cx_permutation() {
        // control on qubit 0 (the LSB): basis states map as
        // 00→00, 01→11, 10→10, 11→01 reading bit strings LSB-first
        let mut circuit = Circuit::new();
        circuit.add_gate(0, [0, 1], gates::cx()).unwrap();
        let u = circuit.matrix();
        assert_eq!(u.shape(), &[4, 4]);
        let expect = [(0, 0), (3, 1), (2, 2), (1, 3)];
        for row in 0..4 {
            for col in 0..4 {
                let entry = u.get(&[row, col]).unwrap();
                if expect.contains(&(row, col)) {
                    assert_eq!(entry, &TrigPolynomial::one());
                } else {
                    assert_eq!(entry, &TrigPolynomial::zero());
                }
            }
        }
    }

    #[test]
    fn insertion_order_independent() {
        let mut a = Circuit::new();
        a.add_gate(0, [0], gates::ry('a')).unwrap();
        a.add_gate(1, [0], gates::rx('b')).unwrap();

        let mut b = Circuit::new();
        b.add_gate(1, [0], gates::rx('b')).unwrap();
        b.add_gate(0, [0], gates::ry('a')).unwrap();

        assert!(TrigTensor::equivalent(&a.matrix(), &b.matrix(), None));
    }

    #[test]
    fn time_order_governs_composition() {
        // X then Z differs from Z then X by a sign on the off-diagonals
        let mut xz = Circuit::new();
        xz.add_gate(0, [0], gates::x()).unwrap();
        xz.add_gate(1, [0], gates::z()).unwrap();

        let mut zx = Circuit::new();
        zx.add_gate(0, [0], gates::z()).unwrap();
        zx.add_gate(1, [0], gates::x()).unwrap();

        // X first gives Z·X, with the sign landing on row 1
        let uxz = xz.matrix();
        let uzx = zx.matrix();
        assert_eq!(
            uxz.get(&[1, 0]).unwrap(),
            &(TrigPolynomial::one() * c!(-1.0)),
        );
        assert_eq!(uxz.get(&[0, 1]).unwrap(), &TrigPolynomial::one());
        assert_eq!(uzx.get(&[1, 0]).unwrap(), &TrigPolynomial::one());
        assert_eq!(
            uzx.get(&[0, 1]).unwrap(),
            &(TrigPolynomial::one() * c!(-1.0)),
        );
    }

    #[test]
    fn qubit_gaps_are_implicit_identity() {
        let mut circuit = Circuit::new();
        circuit.add_gate(0, [1], gates::x()).unwrap();
        assert_eq!(circuit.nqubit(), 2);
        assert_eq!(circuit.nqubit_sparse(), 1);
        let u = circuit.matrix();
        assert_eq!(u.shape(), &[4, 4]);
        // X on qubit 1 flips bit 1 and leaves bit 0 alone
        for col in 0..4 {
            let row = col ^ 2;
            assert_eq!(u.get(&[row, col]), Some(&TrigPolynomial::one()));
            assert_eq!(u.get(&[col, col]), Some(&TrigPolynomial::zero()));
        }
    }

    #[test]
    fn swap_embedding() {
        let mut circuit = Circuit::new();
        circuit.add_gate(0, [0, 1], gates::swap()).unwrap();
        let u = circuit.matrix();
        let expect = [(0, 0), (2, 1), (1, 2), (3, 3)];
        for (row, col) in expect {
            assert_eq!(u.get(&[row, col]), Some(&TrigPolynomial::one()));
        }
    }

    #[test]
    fn disjoint_same_time_gates_commute() {
        let mut ab = Circuit::new();
        ab.add_gate(0, [0], gates::ry('a')).unwrap();
        ab.add_gate(0, [1], gates::ry('b')).unwrap();

        let mut ba = Circuit::new();
        ba.add_gate(0, [1], gates::ry('b')).unwrap();
        ba.add_gate(0, [0], gates::ry('a')).unwrap();

        assert!(TrigTensor::equivalent(&ab.matrix(), &ba.matrix(), None));
    }

    #[test]
    fn derived_views() {
        let mut circuit = Circuit::new();
        circuit.add_gate(0, [2], gates::i()).unwrap();
        circuit.add_gate(2, [1], gates::i()).unwrap();
        circuit.add_gate(3, [0, 1], gates::cx()).unwrap();
        assert_eq!(circuit.max_qubit(), Some(2));
        assert_eq!(circuit.max_time(), Some(3));
        assert_eq!(circuit.nqubit(), 3);
        assert_eq!(circuit.ntime(), 4);
        assert_eq!(circuit.ntime_sparse(), 3);
        assert_eq!(circuit.ngate(), 3);
        assert_eq!(circuit.ngate1(), 2);
        assert_eq!(circuit.ngate2(), 1);
        assert!(circuit.times_and_qubits().contains(&(3, 1)));
        assert!(!circuit.times_and_qubits().contains(&(1, 1)));
    }

    #[test]
    fn ascii_diagram_smoke() {
        let mut circuit = Circuit::new();
        circuit.add_gate(0, [0], gates::h()).unwrap();
        circuit.add_gate(1, [0, 1], gates::cx()).unwrap();
        let diagram = circuit.to_string();
        assert!(diagram.contains('H'));
        assert!(diagram.contains('@'));
        assert!(diagram.lines().next().unwrap().starts_with('T'));
    }
}
