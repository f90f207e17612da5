pub mod error;
pub mod gate;
pub mod circuit;
pub mod index;
pub mod instruct;
pub mod state;
pub mod apply;
pub mod ket;
pub mod target;
pub mod verify;
pub mod measure;
pub mod puzzle;
pub mod json;
pub mod easybuild;

pub use error::{EngineError, InvalidGateError, StateError, UndefinedTargetError, VerifyError};
pub use gate::Gate;
pub use circuit::{Circuit, GateOp};
pub use state::State;
pub use apply::{apply, evolve};
pub use target::Target;
pub use verify::{Verdict, Verifier, VerifyConfig, verify};
