use crate::circuit::{Circuit, GateOp, cnot, h, x};
use crate::target::BellState;

/// Circuit preparing `bell` from |00⟩: X on the seed bits, then H(0), CNOT(0, 1).
pub fn bell_circuit(bell: BellState) -> Circuit {
    let mut ops: Vec<GateOp> = bell
        .seed_bits()
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == 1)
        .map(|(q, _)| x(q))
        .collect();
    ops.push(h(0));
    ops.push(cnot(0, 1).unwrap());
    Circuit::new(2, ops).unwrap()
}

/// n-qubit GHZ preparation: H(0) followed by CNOT(0, k) for every k > 0.
///
/// # Example
/// ```
/// use qgoal::easybuild::ghz_circuit;
/// use qgoal::{apply, verify, State};
///
/// let state = apply(&ghz_circuit(3), &State::zero_state(3).unwrap()).unwrap();
/// assert!(verify(&state, "|GHZ⟩", 3).is_match());
/// ```
pub fn ghz_circuit(n: usize) -> Circuit {
    if n == 0 {
        return Circuit::empty(0);
    }
    let mut ops = vec![h(0)];
    ops.extend((1..n).map(|k| cnot(0, k).unwrap()));
    Circuit::new(n, ops).unwrap()
}

/// A Hadamard on every qubit.
pub fn h_all(n: usize) -> Circuit {
    Circuit::new(n, (0..n).map(h).collect()).unwrap()
}
