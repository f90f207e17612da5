use ndarray::Array1;
use num_complex::Complex64;

use crate::circuit::GateOp;
use crate::error::{EngineError, InvalidGateError, StateError};
use crate::gate::Gate;
use crate::index::{basis_index, checked_dim};
use crate::instruct::{instruct_controlled_flip, instruct_controlled_phase, instruct_single};

/// Largest squared-norm drift accepted by [`State::from_amplitudes`].
pub const NORM_TOLERANCE: f64 = 1e-6;

/// Amplitude vector of an `n`-qubit register.
///
/// `data[i]` is the amplitude of the basis state whose bit `q` is qubit `q`.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub num_qubits: usize,
    pub data: Array1<Complex64>,
}

impl State {
    /// Creates the basis state with qubit `q` set to `bits[q]`.
    ///
    /// # Example
    /// ```
    /// use qgoal::State;
    /// let state = State::initialize(2, &[1, 0]).unwrap();
    /// assert_eq!(state.data[1].re, 1.0);
    /// ```
    pub fn initialize(n: usize, bits: &[u8]) -> Result<Self, StateError> {
        if n == 0 {
            return Err(StateError::NoQubits);
        }
        if bits.len() != n {
            return Err(StateError::BitCountMismatch {
                expected: n,
                actual: bits.len(),
            });
        }
        if let Some((qubit, &value)) = bits.iter().enumerate().find(|&(_, &b)| b > 1) {
            return Err(StateError::InvalidBit { qubit, value });
        }
        let dim = checked_dim(n).ok_or(StateError::TooManyQubits(n))?;

        let mut data = Array1::zeros(dim);
        data[basis_index(bits)] = Complex64::new(1.0, 0.0);
        Ok(State { num_qubits: n, data })
    }

    /// Creates |0...0⟩.
    pub fn zero_state(n: usize) -> Result<Self, StateError> {
        Self::initialize(n, &vec![0; n])
    }

    /// Wraps explicit amplitudes, checking length `2^n` and unit norm.
    pub fn from_amplitudes(n: usize, amplitudes: Vec<Complex64>) -> Result<Self, StateError> {
        if n == 0 {
            return Err(StateError::NoQubits);
        }
        let expected = checked_dim(n).ok_or(StateError::TooManyQubits(n))?;
        if amplitudes.len() != expected {
            return Err(StateError::AmplitudeCountMismatch {
                expected,
                actual: amplitudes.len(),
            });
        }
        let state = State {
            num_qubits: n,
            data: Array1::from(amplitudes),
        };
        let norm_sqr = state.norm_sqr();
        if !norm_sqr.is_finite() || (norm_sqr - 1.0).abs() > NORM_TOLERANCE {
            return Err(StateError::NotNormalized(norm_sqr));
        }
        Ok(state)
    }

    /// Applies one gate operation in place.
    ///
    /// The qubit range is checked before any amplitude changes.
    pub fn apply(&mut self, op: &GateOp) -> Result<(), InvalidGateError> {
        op.validate(self.num_qubits)?;
        let n = self.num_qubits;
        let Some(amps) = self.data.as_slice_mut() else {
            unreachable!("state vectors are always contiguous");
        };

        log::trace!("apply {}", op);
        match op.gate() {
            gate @ (Gate::H | Gate::X | Gate::Y | Gate::Z | Gate::S | Gate::T) => {
                instruct_single(amps, n, gate, op.target())
            }
            Gate::CNOT | Gate::Toffoli => {
                instruct_controlled_flip(amps, n, op.controls(), op.target())
            }
            Gate::CZ => instruct_controlled_phase(amps, n, op.qubits(), Complex64::new(-1.0, 0.0)),
        }
        Ok(())
    }

    /// Applies each operation in order.
    ///
    /// Stops at the first invalid operation and reports its position. Gates
    /// before it stay applied; there is no rollback.
    pub fn apply_sequence(&mut self, ops: &[GateOp]) -> Result<(), EngineError> {
        log::debug!("applying {} gate(s) to {} qubit(s)", ops.len(), self.num_qubits);
        for (position, op) in ops.iter().enumerate() {
            self.apply(op)
                .map_err(|source| EngineError::Sequence { position, source })?;
        }
        Ok(())
    }

    /// Sum of squared moduli.
    pub fn norm_sqr(&self) -> f64 {
        self.data.iter().map(|c| c.norm_sqr()).sum()
    }

    /// L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Length of the data vector
    pub fn total_dim(&self) -> usize {
        self.data.len()
    }

    /// Amplitude at a basis index, or `None` past the end.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.data.get(index).copied()
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.data.iter().map(|c| c.norm_sqr()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{cnot, h, x};

    #[test]
    fn test_initialize_errors() {
        assert_eq!(State::initialize(0, &[]), Err(StateError::NoQubits));
        assert_eq!(
            State::initialize(2, &[1]),
            Err(StateError::BitCountMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            State::initialize(2, &[0, 2]),
            Err(StateError::InvalidBit { qubit: 1, value: 2 })
        );
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let mut state = State::zero_state(2).unwrap();
        state.apply(&h(0)).unwrap();
        let before = state.clone();
        assert!(state.apply(&x(2)).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_sequence_keeps_prefix_on_error() {
        let mut state = State::zero_state(2).unwrap();
        let ops = vec![x(0), cnot(0, 1).unwrap(), x(5), x(1)];
        let err = state.apply_sequence(&ops).unwrap_err();
        assert_eq!(
            err,
            EngineError::Sequence {
                position: 2,
                source: InvalidGateError::QubitOutOfRange {
                    qubit: 5,
                    num_qubits: 2
                }
            }
        );
        // X(0) then CNOT(0,1): |11⟩ = index 3; X(1) never ran
        assert_eq!(state.data[3], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_from_amplitudes_checks() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let amps = vec![Complex64::new(s, 0.0), Complex64::new(0.0, s)];
        assert!(State::from_amplitudes(1, amps.clone()).is_ok());
        assert!(matches!(
            State::from_amplitudes(2, amps),
            Err(StateError::AmplitudeCountMismatch { expected: 4, actual: 2 })
        ));
        assert!(matches!(
            State::from_amplitudes(1, vec![Complex64::new(1.0, 0.0); 2]),
            Err(StateError::NotNormalized(_))
        ));
    }

    #[test]
    fn test_non_finite_amplitudes_rejected() {
        let zero = Complex64::new(0.0, 0.0);
        for bad in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                State::from_amplitudes(1, vec![Complex64::new(bad, 0.0), zero]),
                Err(StateError::NotNormalized(_))
            ));
        }
    }

    #[test]
    fn test_oversized_register_is_an_error() {
        assert_eq!(
            State::initialize(64, &[0; 64]),
            Err(StateError::TooManyQubits(64))
        );
        assert_eq!(State::zero_state(200), Err(StateError::TooManyQubits(200)));
        assert_eq!(
            State::from_amplitudes(64, vec![]),
            Err(StateError::TooManyQubits(64))
        );
    }
}
