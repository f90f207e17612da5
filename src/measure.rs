//! Computational-basis probabilities and shot sampling.
//!
//! - [`probs`] - probability distribution over all or some qubits
//! - [`measure`] - sample outcomes without collapsing the state
//! - [`histogram`] - counts per outcome, for diagnostic display
//!
//! Sampling is the only source of randomness in the crate and always uses a
//! caller-supplied generator; evolution and verification are deterministic.

use std::collections::BTreeMap;

use rand::Rng;

use crate::index::{basis_bits, bit};
use crate::state::State;

/// Probability distribution over the computational basis.
///
/// With `locs = Some(&[q0, q1, ..])` the marginal over those qubits is
/// returned, indexed with `q0` as the least significant bit.
///
/// # Example
/// ```
/// use qgoal::{State, measure::probs};
/// use qgoal::circuit::h;
///
/// let mut state = State::zero_state(2).unwrap();
/// state.apply(&h(1)).unwrap();
/// let p = probs(&state, Some(&[1]));
/// assert!((p[0] - 0.5).abs() < 1e-12);
/// assert!((p[1] - 0.5).abs() < 1e-12);
/// ```
pub fn probs(state: &State, locs: Option<&[usize]>) -> Vec<f64> {
    match locs {
        None => state.probabilities(),
        Some(locs) => marginal_probs(state, locs),
    }
}

fn marginal_probs(state: &State, locs: &[usize]) -> Vec<f64> {
    let mut prob_vec = vec![0.0; 1 << locs.len()];
    for (flat_idx, amp) in state.data.iter().enumerate() {
        let marginal_idx = locs
            .iter()
            .enumerate()
            .fold(0, |acc, (k, &q)| acc | (bit(flat_idx, q) << k));
        prob_vec[marginal_idx] += amp.norm_sqr();
    }
    prob_vec
}

/// Sample an index from a probability distribution.
fn sample_from_probs(probs: &[f64], rng: &mut impl Rng) -> usize {
    let r: f64 = rng.r#gen();
    let mut cumsum = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        cumsum += p;
        if r < cumsum {
            return i;
        }
    }
    probs.len() - 1
}

/// Sample `nshots` outcomes; each outcome lists one bit per measured qubit.
pub fn measure(
    state: &State,
    locs: Option<&[usize]>,
    nshots: usize,
    rng: &mut impl Rng,
) -> Vec<Vec<u8>> {
    let p = probs(state, locs);
    let width = locs.map_or(state.num_qubits, <[usize]>::len);
    (0..nshots)
        .map(|_| basis_bits(sample_from_probs(&p, rng), width))
        .collect()
}

/// Count sampled basis indices over all qubits.
pub fn histogram(state: &State, nshots: usize, rng: &mut impl Rng) -> BTreeMap<usize, usize> {
    let p = state.probabilities();
    let mut counts = BTreeMap::new();
    for _ in 0..nshots {
        *counts.entry(sample_from_probs(&p, rng)).or_insert(0) += 1;
    }
    counts
}
