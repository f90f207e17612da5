use crate::circuit::{Circuit, GateOp};
use crate::error::{EngineError, InvalidGateError};
use crate::state::State;

/// Apply a circuit to a copy of `state`.
///
/// # Example
/// ```
/// use qgoal::{apply, Circuit, State};
/// use qgoal::circuit::{cnot, h};
///
/// let circuit = Circuit::new(2, vec![h(0), cnot(0, 1).unwrap()]).unwrap();
/// let bell = apply(&circuit, &State::zero_state(2).unwrap()).unwrap();
/// assert!((bell.data[3].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// ```
pub fn apply(circuit: &Circuit, state: &State) -> Result<State, EngineError> {
    let mut result = state.clone();
    apply_inplace(circuit, &mut result)?;
    Ok(result)
}

/// Apply a circuit to `state` in place.
///
/// A circuit built for a different register size is rejected before any
/// gate runs.
pub fn apply_inplace(circuit: &Circuit, state: &mut State) -> Result<(), EngineError> {
    if circuit.num_qubits() != state.num_qubits {
        return Err(EngineError::RegisterMismatch {
            circuit: circuit.num_qubits(),
            state: state.num_qubits,
        });
    }
    state.apply_sequence(circuit.ops())
}

/// Initialize `n` qubits to `bits` and run `ops` on them.
///
/// # Example
/// ```
/// use qgoal::apply::evolve;
/// use qgoal::circuit::x;
///
/// let state = evolve(1, &[0], &[x(0)]).unwrap();
/// assert_eq!(state.data[1].re, 1.0);
/// ```
pub fn evolve(n: usize, bits: &[u8], ops: &[GateOp]) -> Result<State, EngineError> {
    let mut state = State::initialize(n, bits)?;
    state.apply_sequence(ops)?;
    Ok(state)
}

/// Validate a gate sequence against `n` qubits without running it.
pub fn validate_sequence(n: usize, ops: &[GateOp]) -> Result<(), EngineError> {
    ops.iter().enumerate().try_for_each(|(position, op)| {
        op.validate(n)
            .map_err(|source: InvalidGateError| EngineError::Sequence { position, source })
    })
}
