use fleet_core::FleetError;
use fleet_exec::ExecError;
use fleet_plan::PlanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("run configuration error: {0}")]
    Config(String),

    #[error("{agents} connected agents but {plans} plans")]
    RosterMismatch { agents: usize, plans: usize },

    #[error(transparent)]
    Core(#[from] FleetError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

pub type RunResult<T> = Result<T, RunError>;
