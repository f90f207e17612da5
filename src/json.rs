use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::circuit::{Circuit, GateOp};
use crate::error::InvalidGateError;
use crate::gate::Gate;
use crate::puzzle::Puzzle;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("circuit validation error: {0}")]
    Gate(#[from] InvalidGateError),
}

#[derive(Serialize, Deserialize)]
struct CircuitJson {
    num_qubits: usize,
    ops: Vec<GateJson>,
}

#[derive(Serialize, Deserialize)]
struct GateJson {
    gate: String,
    qubits: Vec<usize>,
}

#[derive(Deserialize)]
struct PuzzleJson {
    name: String,
    num_qubits: usize,
    initial_bits: Vec<u8>,
    target: String,
    #[serde(default)]
    allowed_gates: Vec<String>,
    #[serde(default)]
    max_gates: Option<usize>,
}

impl TryFrom<PuzzleJson> for Puzzle {
    type Error = InvalidGateError;

    fn try_from(p: PuzzleJson) -> Result<Self, Self::Error> {
        let allowed_gates = p
            .allowed_gates
            .iter()
            .map(|name| name.parse::<Gate>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Puzzle {
            name: p.name,
            num_qubits: p.num_qubits,
            initial_bits: p.initial_bits,
            target: p.target,
            allowed_gates,
            max_gates: p.max_gates,
        })
    }
}

/// Serialize a Circuit to a pretty-printed JSON string.
///
/// # Example
/// ```
/// use qgoal::Circuit;
/// use qgoal::circuit::{cnot, h};
/// use qgoal::json::{circuit_from_json, circuit_to_json};
///
/// let circuit = Circuit::new(2, vec![h(0), cnot(0, 1).unwrap()]).unwrap();
/// let json = circuit_to_json(&circuit);
/// assert_eq!(circuit_from_json(&json).unwrap(), circuit);
/// ```
pub fn circuit_to_json(circuit: &Circuit) -> String {
    let circuit_json = CircuitJson {
        num_qubits: circuit.num_qubits(),
        ops: circuit
            .ops()
            .iter()
            .map(|op| GateJson {
                gate: op.gate().to_string(),
                qubits: op.qubits().to_vec(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&circuit_json).unwrap()
}

/// Deserialize and validate a Circuit from a JSON string.
pub fn circuit_from_json(json: &str) -> Result<Circuit, JsonError> {
    let circuit_json: CircuitJson = serde_json::from_str(json)?;
    let ops = circuit_json
        .ops
        .iter()
        .map(|g| GateOp::parse(&g.gate, &g.qubits))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Circuit::new(circuit_json.num_qubits, ops)?)
}

/// Parse a level catalogue: either a bare array or `{ "puzzles": [...] }`.
///
/// Gate names in `allowed_gates` are parsed like circuit gate names, so
/// aliases such as `cx` load and an unknown name is a [`JsonError::Gate`].
pub fn puzzles_from_json(json: &str) -> Result<Vec<Puzzle>, JsonError> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    if let Some(puzzles) = value.get_mut("puzzles") {
        value = puzzles.take();
    }
    let puzzles: Vec<PuzzleJson> = serde_json::from_value(value)?;
    let puzzles = puzzles
        .into_iter()
        .map(Puzzle::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(puzzles)
}
