//! Product-ket literals such as `|+0⟩` or `|1-⟩`.
//!
//! A ket is prepared as a basis bit pattern followed by a Hadamard prefix
//! circuit, so the engine never needs a special "plus state" vector.
//! Symbol `k` of the literal describes qubit `k`.

use std::fmt;
use std::str::FromStr;

use crate::circuit::{Circuit, h};
use crate::error::{EngineError, StateError};
use crate::state::State;

/// Single-qubit factor of a product ket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qubit {
    Zero,
    One,
    Plus,
    Minus,
}

impl Qubit {
    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '0' => Some(Qubit::Zero),
            '1' => Some(Qubit::One),
            '+' => Some(Qubit::Plus),
            '-' => Some(Qubit::Minus),
            _ => None,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Qubit::Zero => '0',
            Qubit::One => '1',
            Qubit::Plus => '+',
            Qubit::Minus => '-',
        }
    }

    /// Basis bit set before the prefix (`-` is H applied to |1⟩).
    pub fn bit(&self) -> u8 {
        match self {
            Qubit::Zero | Qubit::Plus => 0,
            Qubit::One | Qubit::Minus => 1,
        }
    }

    pub fn needs_hadamard(&self) -> bool {
        matches!(self, Qubit::Plus | Qubit::Minus)
    }
}

/// A parsed product ket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ket {
    qubits: Vec<Qubit>,
}

impl Ket {
    /// Parses `|...⟩`; `>` is accepted in place of `⟩`.
    ///
    /// # Example
    /// ```
    /// use qgoal::ket::Ket;
    /// let ket = Ket::parse("|+0>").unwrap();
    /// assert_eq!(ket.num_qubits(), 2);
    /// assert_eq!(ket.basis_bits(), vec![0, 0]);
    /// assert_eq!(ket.to_string(), "|+0⟩");
    /// ```
    pub fn parse(s: &str) -> Result<Self, StateError> {
        let invalid = || StateError::InvalidKet(s.to_string());
        let inner = s
            .trim()
            .strip_prefix('|')
            .and_then(|rest| rest.strip_suffix('⟩').or_else(|| rest.strip_suffix('>')))
            .ok_or_else(invalid)?;
        let qubits = inner
            .chars()
            .map(Qubit::from_symbol)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        if qubits.is_empty() {
            return Err(invalid());
        }
        Ok(Ket { qubits })
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Whether the ket is a computational basis state.
    pub fn is_basis(&self) -> bool {
        !self.qubits.iter().any(Qubit::needs_hadamard)
    }

    pub fn basis_bits(&self) -> Vec<u8> {
        self.qubits.iter().map(Qubit::bit).collect()
    }

    /// One H per `+`/`-` qubit, in qubit order.
    pub fn prefix(&self) -> Circuit {
        let ops = self
            .qubits
            .iter()
            .enumerate()
            .filter(|(_, qubit)| qubit.needs_hadamard())
            .map(|(q, _)| h(q))
            .collect();
        Circuit::new(self.num_qubits(), ops).unwrap()
    }

    /// Initialize the basis bits and run the prefix.
    pub fn prepare(&self) -> Result<State, EngineError> {
        let mut state = State::initialize(self.num_qubits(), &self.basis_bits())?;
        state.apply_sequence(self.prefix().ops())?;
        Ok(state)
    }
}

impl From<Qubit> for Ket {
    fn from(qubit: Qubit) -> Self {
        Ket {
            qubits: vec![qubit],
        }
    }
}

impl FromStr for Ket {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ket::parse(s)
    }
}

impl fmt::Display for Ket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: String = self.qubits.iter().map(Qubit::symbol).collect();
        write!(f, "|{}⟩", symbols)
    }
}
