#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use num_complex::Complex64;
use qgoal::State;

pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

pub fn assert_amplitudes(state: &State, expected: &[Complex64]) {
    assert_eq!(state.data.len(), expected.len());
    for (a, e) in state.data.iter().zip(expected) {
        assert_abs_diff_eq!(a.re, e.re, epsilon = 1e-10);
        assert_abs_diff_eq!(a.im, e.im, epsilon = 1e-10);
    }
}

pub fn assert_states_close(a: &State, b: &State) {
    assert_eq!(a.num_qubits, b.num_qubits);
    for (x, y) in a.data.iter().zip(b.data.iter()) {
        assert_abs_diff_eq!(x.re, y.re, epsilon = 1e-10);
        assert_abs_diff_eq!(x.im, y.im, epsilon = 1e-10);
    }
}

/// Normalizes raw `(re, im)` pairs into an `n`-qubit state.
pub fn normalized_state(n: usize, raw: &[(f64, f64)]) -> State {
    let mut amps: Vec<Complex64> = raw.iter().map(|&(re, im)| c(re, im)).collect();
    amps[0] += c(1e-3, 0.0);
    let norm = amps.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
    for a in amps.iter_mut() {
        *a /= norm;
    }
    State::from_amplitudes(n, amps).unwrap()
}
