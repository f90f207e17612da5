//! Catalogue of named goal states.
//!
//! A target is looked up by its label *and* the register size; a label that
//! resolves for one qubit count may be undefined for another (`|Φ+⟩` only
//! exists for two qubits, `|01⟩` only for two, and so on).
//!
//! - product kets such as `|0⟩`, `|10⟩`, `|+0⟩`, `|1-⟩`, one symbol per qubit
//! - `|Φ+⟩`, `|Φ-⟩`, `|Ψ+⟩`, `|Ψ-⟩` on 2 qubits
//! - `|GHZ⟩` and `|W⟩` on 2 or more qubits
//! - `G|k⟩` for a single-qubit catalogue gate `G` on 1 qubit, e.g. `S|+⟩`, `T|1⟩`
//! - `|+i⟩` and `|-i⟩` on 1 qubit, equal to `S|+⟩` and `S|-⟩`

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::gate::Gate;
use crate::index::{bit, checked_dim, ket_label};
use crate::ket::{Ket, Qubit};

/// The four two-qubit Bell states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BellState {
    PhiPlus,
    PhiMinus,
    PsiPlus,
    PsiMinus,
}

impl BellState {
    pub const ALL: [BellState; 4] = [
        BellState::PhiPlus,
        BellState::PhiMinus,
        BellState::PsiPlus,
        BellState::PsiMinus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BellState::PhiPlus => "|Φ+⟩",
            BellState::PhiMinus => "|Φ-⟩",
            BellState::PsiPlus => "|Ψ+⟩",
            BellState::PsiMinus => "|Ψ-⟩",
        }
    }

    /// Basis bits `(qubit 0, qubit 1)` that `H(0)` then `CNOT(0, 1)` turns
    /// into this state.
    pub fn seed_bits(&self) -> [u8; 2] {
        match self {
            BellState::PhiPlus => [0, 0],
            BellState::PhiMinus => [1, 0],
            BellState::PsiPlus => [0, 1],
            BellState::PsiMinus => [1, 1],
        }
    }

    fn amplitudes(&self) -> Array1<Complex64> {
        let s = FRAC_1_SQRT_2;
        // index = q0 + 2*q1; |01⟩ (q0=0, q1=1) is index 2
        let v = match self {
            BellState::PhiPlus => [s, 0.0, 0.0, s],
            BellState::PhiMinus => [s, 0.0, 0.0, -s],
            BellState::PsiPlus => [0.0, s, s, 0.0],
            BellState::PsiMinus => [0.0, -s, s, 0.0],
        };
        v.iter().map(|&re| Complex64::new(re, 0.0)).collect()
    }
}

/// A resolved catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Product of `0`, `1`, `+`, `-` factors.
    Product(Ket),
    Bell(BellState),
    Ghz,
    W,
    /// A single-qubit catalogue gate applied to a one-qubit ket.
    Rotated { gate: Gate, ket: Ket },
}

impl Target {
    /// Resolve a label for `num_qubits` qubits, or `None` when the pair has
    /// no definition.
    ///
    /// # Example
    /// ```
    /// use qgoal::target::{BellState, Target};
    /// assert_eq!(Target::resolve("|Phi+>", 2), Some(Target::Bell(BellState::PhiPlus)));
    /// assert_eq!(Target::resolve("|Φ+⟩", 3), None);
    /// ```
    pub fn resolve(label: &str, num_qubits: usize) -> Option<Self> {
        if num_qubits == 0 {
            return None;
        }
        let label = normalize_label(label);
        let named = match label.as_str() {
            "|Φ+⟩" if num_qubits == 2 => Some(Target::Bell(BellState::PhiPlus)),
            "|Φ-⟩" if num_qubits == 2 => Some(Target::Bell(BellState::PhiMinus)),
            "|Ψ+⟩" if num_qubits == 2 => Some(Target::Bell(BellState::PsiPlus)),
            "|Ψ-⟩" if num_qubits == 2 => Some(Target::Bell(BellState::PsiMinus)),
            "|GHZ⟩" if num_qubits >= 2 => Some(Target::Ghz),
            "|W⟩" if num_qubits >= 2 => Some(Target::W),
            "|+i⟩" if num_qubits == 1 => Some(rotated(Gate::S, Qubit::Plus)),
            "|-i⟩" if num_qubits == 1 => Some(rotated(Gate::S, Qubit::Minus)),
            _ => None,
        };
        if named.is_some() {
            return named;
        }

        if let Ok(ket) = Ket::parse(&label) {
            return (ket.num_qubits() == num_qubits).then_some(Target::Product(ket));
        }

        // Operator form `G|k⟩`
        let (gate_name, ket) = label.split_at(label.find('|')?);
        let gate: Gate = gate_name.parse().ok()?;
        let ket = Ket::parse(ket).ok()?;
        (gate.arity() == 1 && num_qubits == 1 && ket.num_qubits() == 1)
            .then_some(Target::Rotated { gate, ket })
    }

    /// Closed-form amplitude of basis `index`; zero outside `2^num_qubits`.
    pub fn amplitude(&self, index: usize, num_qubits: usize) -> Complex64 {
        let zero = Complex64::new(0.0, 0.0);
        if !fits(index, num_qubits) {
            return zero;
        }
        match self {
            Target::Product(ket) => ket
                .qubits()
                .iter()
                .enumerate()
                .map(|(q, &factor)| single_amplitudes(factor)[bit(index, q)])
                .product(),
            Target::Bell(bell) => bell.amplitudes().get(index).copied().unwrap_or(zero),
            Target::Ghz => {
                // |0…0⟩ and |1…1⟩
                if index == 0 || index.count_ones() as usize == num_qubits {
                    Complex64::new(FRAC_1_SQRT_2, 0.0)
                } else {
                    zero
                }
            }
            Target::W => {
                if index.is_power_of_two() {
                    Complex64::new(1.0 / (num_qubits as f64).sqrt(), 0.0)
                } else {
                    zero
                }
            }
            Target::Rotated { gate, ket } => gate
                .matrix()
                .dot(&single_amplitudes(ket.qubits()[0]))
                .get(index)
                .copied()
                .unwrap_or(zero),
        }
    }

    /// Reference amplitudes over all `2^num_qubits` entries.
    pub fn amplitudes(&self, num_qubits: usize) -> Result<Array1<Complex64>, StateError> {
        let dim = checked_dim(num_qubits).ok_or(StateError::TooManyQubits(num_qubits))?;
        Ok((0..dim).map(|i| self.amplitude(i, num_qubits)).collect())
    }
}

/// Whether `index` lies below `2^num_qubits`.
fn fits(index: usize, num_qubits: usize) -> bool {
    u32::try_from(num_qubits)
        .ok()
        .and_then(|shift| index.checked_shr(shift))
        .is_none_or(|high| high == 0)
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Product(ket) => write!(f, "{}", ket),
            Target::Bell(bell) => f.write_str(bell.label()),
            Target::Ghz => f.write_str("|GHZ⟩"),
            Target::W => f.write_str("|W⟩"),
            Target::Rotated { gate, ket } => write!(f, "{}{}", gate, ket),
        }
    }
}

fn rotated(gate: Gate, qubit: Qubit) -> Target {
    Target::Rotated {
        gate,
        ket: Ket::from(qubit),
    }
}

fn single_amplitudes(qubit: Qubit) -> Array1<Complex64> {
    let s = FRAC_1_SQRT_2;
    let (a, b) = match qubit {
        Qubit::Zero => (1.0, 0.0),
        Qubit::One => (0.0, 1.0),
        Qubit::Plus => (s, s),
        Qubit::Minus => (s, -s),
    };
    Array1::from(vec![Complex64::new(a, 0.0), Complex64::new(b, 0.0)])
}

/// Canonical spelling of a label: ASCII `>` becomes `⟩`, `Phi`/`Psi` become
/// `Φ`/`Ψ`, `GHZ`/`W` are upper-cased in any spelling, and surrounding
/// whitespace is dropped.
///
/// # Example
/// ```
/// use qgoal::target::normalize_label;
/// assert_eq!(normalize_label(" |psi-> "), "|Ψ-⟩");
/// assert_eq!(normalize_label("|Ghz⟩"), "|GHZ⟩");
/// ```
pub fn normalize_label(label: &str) -> String {
    let mut s = label.trim().replace('>', "⟩");
    for (ascii, greek) in [("phi", "Φ"), ("psi", "Ψ")] {
        if let Some(pos) = s.to_ascii_lowercase().find(ascii) {
            s.replace_range(pos..pos + ascii.len(), greek);
        }
    }
    for word in ["GHZ", "W"] {
        let canonical = format!("|{}⟩", word);
        if s.eq_ignore_ascii_case(&canonical) {
            s = canonical;
        }
    }
    s
}

/// Reference amplitudes for `label` on `num_qubits` qubits.
///
/// `None` when the label is undefined for that size or `2^num_qubits`
/// amplitudes cannot be addressed.
pub fn reference(label: &str, num_qubits: usize) -> Option<Array1<Complex64>> {
    Target::resolve(label, num_qubits)?.amplitudes(num_qubits).ok()
}

/// Named (non-ket) labels defined for `num_qubits` qubits.
///
/// Product kets are open-ended and not listed.
pub fn catalogue(num_qubits: usize) -> Vec<String> {
    let mut labels = Vec::new();
    match num_qubits {
        0 => {}
        1 => {
            labels.extend(["|+i⟩", "|-i⟩"].map(String::from));
            for gate in [Gate::S, Gate::T, Gate::Z] {
                for ket in ["|+⟩", "|1⟩"] {
                    labels.push(format!("{}{}", gate, ket));
                }
            }
        }
        _ => {
            if num_qubits == 2 {
                labels.extend(BellState::ALL.iter().map(|b| b.label().to_string()));
            }
            labels.push("|GHZ⟩".to_string());
            labels.push("|W⟩".to_string());
        }
    }
    labels
}

/// Render amplitudes as `a|0…⟩ + b|…⟩`, skipping zero entries.
pub fn describe(amplitudes: &Array1<Complex64>, num_qubits: usize) -> String {
    let terms: Vec<String> = amplitudes
        .iter()
        .enumerate()
        .filter(|(_, a)| a.norm() > 1e-12)
        .map(|(i, a)| format!("({:.3}{:+.3}i){}", a.re, a.im, ket_label(i, num_qubits)))
        .collect();
    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    }
}
