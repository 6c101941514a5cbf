use fleet_core::{AgentId, Cell};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("start cell {cell} for agent {agent} is already held by {holder}")]
    StartCellHeld {
        agent:  AgentId,
        cell:   Cell,
        holder: AgentId,
    },

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type ExecResult<T> = Result<T, ExecError>;
