//! Primitive amplitude operations for state vector simulation.
//!
//! Every kernel works in place on a slice of `2^n` amplitudes and touches
//! each amplitude at most once per call. Callers are responsible for
//! checking qubit ranges beforehand.

use num_complex::Complex64;

use crate::gate::{Gate, t_phase};
use crate::index::{bit, flip, iter_basis_fixed, iter_pairs, mask};

/// Apply a 2x2 rule `[[a, b], [c, d]]` to the amplitude pair `(i, j)`:
/// - new_i = a * state[i] + b * state[j]
/// - new_j = c * state[i] + d * state[j]
///
/// # Example
/// ```
/// use num_complex::Complex64;
/// use qgoal::instruct::u1rows;
///
/// // X on |0⟩
/// let zero = Complex64::new(0.0, 0.0);
/// let one = Complex64::new(1.0, 0.0);
/// let mut state = vec![one, zero];
/// u1rows(&mut state, 0, 1, [[zero, one], [one, zero]]);
/// assert_eq!(state, vec![zero, one]);
/// ```
#[inline]
pub fn u1rows(state: &mut [Complex64], i: usize, j: usize, m: [[Complex64; 2]; 2]) {
    let old_i = state[i];
    let old_j = state[j];
    state[i] = m[0][0] * old_i + m[0][1] * old_j;
    state[j] = m[1][0] * old_i + m[1][1] * old_j;
}

/// Multiply the amplitude at index `i` by `factor`.
#[inline]
pub fn mulrow(state: &mut [Complex64], i: usize, factor: Complex64) {
    state[i] *= factor;
}

/// Swap the amplitudes at `i` and `j`.
#[inline]
pub fn swaprows(state: &mut [Complex64], i: usize, j: usize) {
    state.swap(i, j);
}

/// Apply a single-qubit catalogue gate to qubit `loc` of an `n`-qubit state.
///
/// Pairs `(|..0..⟩, |..1..⟩)` differing only at `loc` are processed once each,
/// using the closed-form rule of the gate.
pub fn instruct_single(state: &mut [Complex64], n: usize, gate: Gate, loc: usize) {
    debug_assert_eq!(state.len(), 1 << n);
    let i = Complex64::i();
    match gate {
        Gate::H => {
            let s = std::f64::consts::FRAC_1_SQRT_2;
            for (i0, i1) in iter_pairs(n, loc) {
                let a = state[i0];
                let b = state[i1];
                state[i0] = (a + b) * s;
                state[i1] = (a - b) * s;
            }
        }
        Gate::X => {
            for (i0, i1) in iter_pairs(n, loc) {
                swaprows(state, i0, i1);
            }
        }
        Gate::Y => {
            let zero = Complex64::new(0.0, 0.0);
            for (i0, i1) in iter_pairs(n, loc) {
                u1rows(state, i0, i1, [[zero, -i], [i, zero]]);
            }
        }
        Gate::Z => instruct_diagonal(state, n, Complex64::new(-1.0, 0.0), loc),
        Gate::S => instruct_diagonal(state, n, i, loc),
        Gate::T => instruct_diagonal(state, n, t_phase(), loc),
        Gate::CNOT | Gate::CZ | Gate::Toffoli => {
            unreachable!("{} is not a single-qubit gate", gate)
        }
    }
}

/// Multiply every amplitude whose qubit `loc` is 1 by `phase`.
///
/// This is the action of a diagonal gate `diag(1, phase)` (Z, S, T).
pub fn instruct_diagonal(state: &mut [Complex64], n: usize, phase: Complex64, loc: usize) {
    for (_, i1) in iter_pairs(n, loc) {
        mulrow(state, i1, phase);
    }
}

/// Flip qubit `target` wherever every qubit in `controls` is 1 (CNOT, Toffoli).
pub fn instruct_controlled_flip(state: &mut [Complex64], n: usize, controls: &[usize], target: usize) {
    let ctrl_mask = mask(controls);
    for idx in iter_basis_fixed(n, ctrl_mask) {
        // Visit each pair once, from its target-0 side.
        if bit(idx, target) == 0 {
            swaprows(state, idx, flip(idx, target));
        }
    }
}

/// Multiply every amplitude where all of `qubits` are 1 by `phase` (CZ uses -1).
pub fn instruct_controlled_phase(state: &mut [Complex64], n: usize, qubits: &[usize], phase: Complex64) {
    for idx in iter_basis_fixed(n, mask(qubits)) {
        mulrow(state, idx, phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-12
    }

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn basis(n: usize, index: usize) -> Vec<Complex64> {
        let mut v = vec![c(0.0, 0.0); 1 << n];
        v[index] = c(1.0, 0.0);
        v
    }

    #[test]
    fn test_u1rows_non_contiguous_indices() {
        // H on qubit 1 of a 2-qubit register pairs indices 0 and 2
        let mut state = basis(2, 0);
        let s = c(FRAC_1_SQRT_2, 0.0);
        u1rows(&mut state, 0, 2, [[s, s], [s, -s]]);
        assert!(approx_eq(state[0], s));
        assert!(approx_eq(state[1], c(0.0, 0.0)));
        assert!(approx_eq(state[2], s));
        assert!(approx_eq(state[3], c(0.0, 0.0)));
    }

    #[test]
    fn test_hadamard_on_one() {
        // H|1⟩ = (|0⟩ - |1⟩) / √2
        let mut state = basis(1, 1);
        instruct_single(&mut state, 1, Gate::H, 0);
        assert!(approx_eq(state[0], c(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(state[1], c(-FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_x_on_qubit_1() {
        // |00⟩ -> qubit 1 flipped -> index 2
        let mut state = basis(2, 0);
        instruct_single(&mut state, 2, Gate::X, 1);
        assert_eq!(state, basis(2, 2));
    }

    #[test]
    fn test_y_rule() {
        // Y|0⟩ = i|1⟩, Y|1⟩ = -i|0⟩
        let mut state = basis(1, 0);
        instruct_single(&mut state, 1, Gate::Y, 0);
        assert!(approx_eq(state[0], c(0.0, 0.0)));
        assert!(approx_eq(state[1], c(0.0, 1.0)));

        let mut state = basis(1, 1);
        instruct_single(&mut state, 1, Gate::Y, 0);
        assert!(approx_eq(state[0], c(0.0, -1.0)));
        assert!(approx_eq(state[1], c(0.0, 0.0)));
    }

    #[test]
    fn test_phase_gates_only_touch_one_component() {
        let s = c(FRAC_1_SQRT_2, 0.0);
        for (gate, phase) in [
            (Gate::Z, c(-1.0, 0.0)),
            (Gate::S, c(0.0, 1.0)),
            (Gate::T, Complex64::from_polar(1.0, FRAC_PI_4)),
        ] {
            let mut state = vec![s, s];
            instruct_single(&mut state, 1, gate, 0);
            assert!(approx_eq(state[0], s), "{}", gate);
            assert!(approx_eq(state[1], s * phase), "{}", gate);
        }
    }

    #[test]
    fn test_controlled_flip_cnot() {
        // CNOT(0 -> 1): |10⟩ (index 1) -> |11⟩ (index 3)
        let mut state = basis(2, 1);
        instruct_controlled_flip(&mut state, 2, &[0], 1);
        assert_eq!(state, basis(2, 3));

        // control 0 is off: |01⟩ (index 2) unchanged
        let mut state = basis(2, 2);
        instruct_controlled_flip(&mut state, 2, &[0], 1);
        assert_eq!(state, basis(2, 2));
    }

    #[test]
    fn test_controlled_flip_toffoli() {
        // controls 0, 1 set, target 2: index 3 -> 7
        let mut state = basis(3, 3);
        instruct_controlled_flip(&mut state, 3, &[0, 1], 2);
        assert_eq!(state, basis(3, 7));

        // only one control set: index 1 stays
        let mut state = basis(3, 1);
        instruct_controlled_flip(&mut state, 3, &[0, 1], 2);
        assert_eq!(state, basis(3, 1));
    }

    #[test]
    fn test_controlled_phase() {
        let amp = c(0.5, 0.0);
        let mut state = vec![amp; 4];
        instruct_controlled_phase(&mut state, 2, &[0, 1], c(-1.0, 0.0));
        assert_eq!(state, vec![amp, amp, amp, -amp]);
    }
}
