//! Level definitions and the caller-side policy around the engine.
//!
//! The engine accepts any register size and any catalogue gate. Limits such
//! as a qubit ceiling, the gates a level offers and its gate budget are
//! enforced here, before a sequence reaches [`State::apply_sequence`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::circuit::GateOp;
use crate::error::{EngineError, StateError};
use crate::gate::Gate;
use crate::state::State;
use crate::target::Target;
use crate::verify::{Verdict, Verifier, VerifyConfig};

/// Default ceiling on accepted qubit count.
pub const DEFAULT_MAX_QUBITS: usize = 4;

/// Policy applied before evaluating an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Largest register a puzzle may declare.
    pub max_qubits: usize,
    pub verify: VerifyConfig,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            max_qubits: DEFAULT_MAX_QUBITS,
            verify: VerifyConfig::default(),
        }
    }
}

/// One puzzle level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub name: String,
    pub num_qubits: usize,
    /// One bit per qubit, qubit 0 first.
    pub initial_bits: Vec<u8>,
    pub target: String,
    /// Gates offered by the level; empty means the whole catalogue.
    #[serde(default)]
    pub allowed_gates: Vec<Gate>,
    #[serde(default)]
    pub max_gates: Option<usize>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PuzzleError {
    #[error("puzzle declares {num_qubits} qubits, above the limit of {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    #[error("gate {gate} is not available in this level")]
    GateNotAllowed { gate: Gate },

    #[error("{used} gates used, the level allows {max}")]
    GateBudgetExceeded { used: usize, max: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<StateError> for PuzzleError {
    fn from(e: StateError) -> Self {
        PuzzleError::Engine(e.into())
    }
}

/// The evolved state of an attempt and its verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub state: State,
    pub verdict: Verdict,
}

impl Attempt {
    pub fn solved(&self) -> bool {
        self.verdict.is_match()
    }
}

impl Puzzle {
    /// Whether the level's target resolves in the catalogue.
    pub fn target_defined(&self) -> bool {
        Target::resolve(&self.target, self.num_qubits).is_some()
    }

    pub fn allows(&self, gate: Gate) -> bool {
        self.allowed_gates.is_empty() || self.allowed_gates.contains(&gate)
    }

    /// Checks the policy against a proposed sequence without running it.
    pub fn check(&self, ops: &[GateOp], policy: &Policy) -> Result<(), PuzzleError> {
        if self.num_qubits > policy.max_qubits {
            return Err(PuzzleError::TooManyQubits {
                num_qubits: self.num_qubits,
                max_qubits: policy.max_qubits,
            });
        }
        if let Some(op) = ops.iter().find(|op| !self.allows(op.gate())) {
            return Err(PuzzleError::GateNotAllowed { gate: op.gate() });
        }
        if let Some(max) = self.max_gates
            && ops.len() > max
        {
            return Err(PuzzleError::GateBudgetExceeded {
                used: ops.len(),
                max,
            });
        }
        Ok(())
    }

    /// Enforce the policy, evolve the initial state and verify the result.
    ///
    /// # Example
    /// ```
    /// use qgoal::puzzle::{Policy, Puzzle};
    /// use qgoal::circuit::{cnot, h};
    ///
    /// let puzzle = Puzzle {
    ///     name: "bell".to_string(),
    ///     num_qubits: 2,
    ///     initial_bits: vec![0, 0],
    ///     target: "|Φ+⟩".to_string(),
    ///     allowed_gates: vec![],
    ///     max_gates: Some(2),
    /// };
    /// let attempt = puzzle.attempt(&[h(0), cnot(0, 1).unwrap()], &Policy::default()).unwrap();
    /// assert!(attempt.solved());
    /// ```
    pub fn attempt(&self, ops: &[GateOp], policy: &Policy) -> Result<Attempt, PuzzleError> {
        self.check(ops, policy)?;
        let mut state = State::initialize(self.num_qubits, &self.initial_bits)?;
        state.apply_sequence(ops)?;
        let verdict = Verifier::new(policy.verify).verify(&state, &self.target, self.num_qubits);
        log::debug!("puzzle {}: solved = {}", self.name, verdict.is_match());
        Ok(Attempt { state, verdict })
    }
}
