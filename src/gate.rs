use ndarray::{Array2, array};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::str::FromStr;

use crate::error::InvalidGateError;

/// The fixed gate catalogue.
///
/// Controlled gates list their controls first and the target last, so
/// `CNOT` acts on `[control, target]` and `Toffoli` on `[c1, c2, target]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Gate {
    H,
    X,
    Y,
    Z,
    S,
    T,
    CNOT,
    CZ,
    Toffoli,
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gate {
    type Err = InvalidGateError;

    /// Parse a catalogue name, case-insensitively. `CX`, `CCX` and `CCNOT`
    /// are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(Gate::H),
            "X" => Ok(Gate::X),
            "Y" => Ok(Gate::Y),
            "Z" => Ok(Gate::Z),
            "S" => Ok(Gate::S),
            "T" => Ok(Gate::T),
            "CNOT" | "CX" => Ok(Gate::CNOT),
            "CZ" => Ok(Gate::CZ),
            "TOFFOLI" | "CCX" | "CCNOT" => Ok(Gate::Toffoli),
            _ => Err(InvalidGateError::UnknownGate(s.to_string())),
        }
    }
}

impl TryFrom<String> for Gate {
    type Error = InvalidGateError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl Gate {
    pub const ALL: [Gate; 9] = [
        Gate::H,
        Gate::X,
        Gate::Y,
        Gate::Z,
        Gate::S,
        Gate::T,
        Gate::CNOT,
        Gate::CZ,
        Gate::Toffoli,
    ];

    /// Canonical catalogue name.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "H",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::S => "S",
            Gate::T => "T",
            Gate::CNOT => "CNOT",
            Gate::CZ => "CZ",
            Gate::Toffoli => "Toffoli",
        }
    }

    /// Number of qubit indices the gate takes (controls plus target).
    pub fn arity(&self) -> usize {
        match self {
            Gate::CNOT | Gate::CZ => 2,
            Gate::Toffoli => 3,
            _ => 1,
        }
    }

    /// Number of leading indices that are controls.
    pub fn num_controls(&self) -> usize {
        self.arity() - 1
    }

    /// Returns whether the gate only rescales amplitudes.
    pub fn is_diagonal(&self) -> bool {
        matches!(self, Gate::Z | Gate::S | Gate::T | Gate::CZ)
    }

    /// Returns whether applying the gate twice on the same qubits is the identity.
    pub fn is_self_inverse(&self) -> bool {
        !matches!(self, Gate::S | Gate::T)
    }

    /// The 2x2 action on the target qubit.
    ///
    /// For controlled gates this is the operator applied when every control
    /// is 1: X for `CNOT` and `Toffoli`, Z for `CZ`.
    pub fn matrix(&self) -> Array2<Complex64> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::i();

        match self {
            Gate::H => {
                let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
                array![[s, s], [s, -s]]
            }
            Gate::X | Gate::CNOT | Gate::Toffoli => array![[zero, one], [one, zero]],
            Gate::Y => array![[zero, -i], [i, zero]],
            Gate::Z | Gate::CZ => array![[one, zero], [zero, -one]],
            Gate::S => array![[one, zero], [zero, i]],
            Gate::T => array![[one, zero], [zero, t_phase()]],
        }
    }
}

/// e^{iπ/4}
pub(crate) fn t_phase() -> Complex64 {
    Complex64::from_polar(1.0, FRAC_PI_4)
}
