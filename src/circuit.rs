use std::fmt;

use crate::error::InvalidGateError;
use crate::gate::Gate;

/// A gate placed on specific qubits.
///
/// Controls come first and the target last. Arity and distinctness are
/// checked on construction; range is checked against a register size by
/// [`GateOp::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GateOp {
    gate: Gate,
    qubits: Vec<usize>,
}

impl GateOp {
    /// Creates a gate operation, rejecting wrong arity and repeated qubits.
    pub fn new(gate: Gate, qubits: Vec<usize>) -> Result<Self, InvalidGateError> {
        if qubits.len() != gate.arity() {
            return Err(InvalidGateError::WrongArity {
                gate: gate.to_string(),
                expected: gate.arity(),
                actual: qubits.len(),
            });
        }
        for (k, &q) in qubits.iter().enumerate() {
            if qubits[..k].contains(&q) {
                return Err(InvalidGateError::DuplicateQubit {
                    gate: gate.to_string(),
                    qubit: q,
                });
            }
        }
        Ok(GateOp { gate, qubits })
    }

    /// Resolves a gate name and builds the operation.
    ///
    /// # Example
    /// ```
    /// use qgoal::circuit::GateOp;
    /// use qgoal::gate::Gate;
    /// let op = GateOp::parse("CNOT", &[0, 1]).unwrap();
    /// assert_eq!(op.gate(), Gate::CNOT);
    /// assert!(GateOp::parse("CNOT", &[1, 1]).is_err());
    /// ```
    pub fn parse(name: &str, qubits: &[usize]) -> Result<Self, InvalidGateError> {
        GateOp::new(name.parse()?, qubits.to_vec())
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    /// Leading control qubits (empty for single-qubit gates).
    pub fn controls(&self) -> &[usize] {
        &self.qubits[..self.gate.num_controls()]
    }

    /// The qubit whose amplitude pair is transformed.
    pub fn target(&self) -> usize {
        self.qubits[self.qubits.len() - 1]
    }

    /// Checks every qubit index is in `[0, num_qubits)`.
    pub fn validate(&self, num_qubits: usize) -> Result<(), InvalidGateError> {
        match self.qubits.iter().find(|&&q| q >= num_qubits) {
            Some(&qubit) => Err(InvalidGateError::QubitOutOfRange { qubit, num_qubits }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controls = self.controls();
        if controls.is_empty() {
            write!(f, "{} @ q[{}]", self.gate, self.target())
        } else {
            write!(
                f,
                "{} C(q[{}]) @ q[{}]",
                self.gate,
                format_locs(controls),
                self.target()
            )
        }
    }
}

fn single(gate: Gate, q: usize) -> GateOp {
    GateOp {
        gate,
        qubits: vec![q],
    }
}

pub fn h(q: usize) -> GateOp {
    single(Gate::H, q)
}

pub fn x(q: usize) -> GateOp {
    single(Gate::X, q)
}

pub fn y(q: usize) -> GateOp {
    single(Gate::Y, q)
}

pub fn z(q: usize) -> GateOp {
    single(Gate::Z, q)
}

pub fn s(q: usize) -> GateOp {
    single(Gate::S, q)
}

pub fn t(q: usize) -> GateOp {
    single(Gate::T, q)
}

/// CNOT with `control` and `target`; fails if they coincide.
pub fn cnot(control: usize, target: usize) -> Result<GateOp, InvalidGateError> {
    GateOp::new(Gate::CNOT, vec![control, target])
}

/// Controlled-Z; fails if the qubits coincide.
pub fn cz(control: usize, target: usize) -> Result<GateOp, InvalidGateError> {
    GateOp::new(Gate::CZ, vec![control, target])
}

/// Toffoli with two controls; fails on any repeated qubit.
pub fn toffoli(c1: usize, c2: usize, target: usize) -> Result<GateOp, InvalidGateError> {
    GateOp::new(Gate::Toffoli, vec![c1, c2, target])
}

/// An ordered gate sequence on a fixed number of qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    num_qubits: usize,
    ops: Vec<GateOp>,
}

impl Circuit {
    /// Creates a circuit, validating every operation against `num_qubits`.
    ///
    /// # Errors
    /// Returns the first out-of-range operation's error.
    pub fn new(num_qubits: usize, ops: Vec<GateOp>) -> Result<Self, InvalidGateError> {
        for op in &ops {
            op.validate(num_qubits)?;
        }
        Ok(Circuit { num_qubits, ops })
    }

    /// An empty circuit.
    pub fn empty(num_qubits: usize) -> Self {
        Circuit {
            num_qubits,
            ops: Vec::new(),
        }
    }

    /// Appends an operation after validating its range.
    pub fn push(&mut self, op: GateOp) -> Result<&mut Self, InvalidGateError> {
        op.validate(self.num_qubits)?;
        self.ops.push(op);
        Ok(self)
    }

    /// Appends every operation of `other`, validating each against this register.
    pub fn extend(&mut self, other: &Circuit) -> Result<&mut Self, InvalidGateError> {
        for op in &other.ops {
            self.push(op.clone())?;
        }
        Ok(self)
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Total state-vector dimension `2^n`.
    pub fn total_dim(&self) -> usize {
        1 << self.num_qubits
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nqubits: {}", self.num_qubits)?;
        for op in &self.ops {
            writeln!(f, "  {}", op)?;
        }
        Ok(())
    }
}

fn format_locs(locs: &[usize]) -> String {
    locs.iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
