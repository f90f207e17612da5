//! Error types for gate construction, state initialization and verification.

use thiserror::Error;

/// A malformed gate operation. Always a caller bug, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGateError {
    /// Gate name outside the fixed catalogue
    #[error("unknown gate `{0}`")]
    UnknownGate(String),

    /// Wrong number of qubit indices for the gate
    #[error("gate {gate} acts on {expected} qubit(s), got {actual}")]
    WrongArity {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// A qubit index is not in `[0, n)`
    #[error("qubit {qubit} is out of range (num_qubits = {num_qubits})")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// The same qubit appears twice in one operation
    #[error("qubit {qubit} appears more than once in {gate}")]
    DuplicateQubit { gate: String, qubit: usize },
}

/// Failures building a state vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("qubit count must be at least 1")]
    NoQubits,

    /// `2^n` amplitudes do not fit in memory addressing
    #[error("{0} qubits is too many to hold as a state vector")]
    TooManyQubits(usize),

    #[error("expected {expected} basis bits, got {actual}")]
    BitCountMismatch { expected: usize, actual: usize },

    #[error("basis bit for qubit {qubit} must be 0 or 1, got {value}")]
    InvalidBit { qubit: usize, value: u8 },

    #[error("expected {expected} amplitudes, got {actual}")]
    AmplitudeCountMismatch { expected: usize, actual: usize },

    #[error("state is not normalized: squared norm {0}")]
    NotNormalized(f64),

    #[error("invalid ket literal `{0}`")]
    InvalidKet(String),
}

/// The label/qubit-count pair has no catalogue entry.
///
/// Reported distinctly from a failed match so the caller can say
/// "not supported" instead of "wrong answer".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("target {label} is not defined for {num_qubits} qubit(s)")]
pub struct UndefinedTargetError {
    pub label: String,
    pub num_qubits: usize,
}

/// Verification failures, for callers that prefer `?` over matching a verdict.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifyError {
    #[error("state does not match {label}: {failing} amplitude(s) off by up to {max_deviation:.4}")]
    Mismatch {
        label: String,
        failing: usize,
        max_deviation: f64,
    },

    #[error(transparent)]
    UndefinedTarget(#[from] UndefinedTargetError),
}

/// Top-level error for evolving a circuit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Gate(#[from] InvalidGateError),

    /// A gate sequence stopped at `position`; earlier gates remain applied.
    #[error("gate #{position} rejected: {source}")]
    Sequence {
        position: usize,
        source: InvalidGateError,
    },

    #[error(transparent)]
    State(#[from] StateError),

    /// The circuit was built for a different register size than the state.
    #[error("circuit is built for {circuit} qubit(s), state has {state}")]
    RegisterMismatch { circuit: usize, state: usize },
}

impl EngineError {
    /// The underlying gate error, if this failure came from a gate.
    pub fn gate_error(&self) -> Option<&InvalidGateError> {
        match self {
            EngineError::Gate(e) | EngineError::Sequence { source: e, .. } => Some(e),
            EngineError::State(_) | EngineError::RegisterMismatch { .. } => None,
        }
    }
}
