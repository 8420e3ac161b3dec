use thiserror::Error;

/// Failures of the Blasius shooting solver. The integrator itself never fails,
/// all judgement on a trajectory is made here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShootingError {
    /// secant iteration used up its cap without entering the tolerance band
    #[error(
        "secant method did not converge after {max_iterations} iterations: last f''(0) = {guess}, residual = {residual}"
    )]
    NonConvergence {
        max_iterations: usize,
        guess: f64,
        residual: f64,
    },
    /// two consecutive guesses gave the same residual, the secant update divides by zero
    #[error(
        "degenerate secant step: f''(0) = {guess_old} and f''(0) = {guess_new} both give residual {residual}"
    )]
    DegenerateSecantStep {
        guess_old: f64,
        guess_new: f64,
        residual: f64,
    },
    /// integration blew up for this trial parameter
    #[error("non-finite state at eta = {eta} (grid point {index}) for f''(0) = {guess}")]
    NonFiniteState { guess: f64, index: usize, eta: f64 },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ShootingError {
    /// short name used in the statistics table and log records
    pub fn kind(&self) -> &'static str {
        match self {
            ShootingError::NonConvergence { .. } => "NonConvergence",
            ShootingError::DegenerateSecantStep { .. } => "DegenerateSecantStep",
            ShootingError::NonFiniteState { .. } => "NonFiniteState",
            ShootingError::InvalidParameter(_) => "InvalidParameter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_diagnostics() {
        let e = ShootingError::NonConvergence {
            max_iterations: 5,
            guess: 0.3,
            residual: 1e-3,
        };
        let msg = e.to_string();
        assert!(msg.contains("5 iterations"));
        assert!(msg.contains("0.3"));
        assert_eq!(e.kind(), "NonConvergence");

        let e = ShootingError::DegenerateSecantStep {
            guess_old: 1.0,
            guess_new: 2.0,
            residual: -1.0,
        };
        assert!(e.to_string().contains("residual -1"));

        let e = ShootingError::NonFiniteState {
            guess: 1e10,
            index: 3,
            eta: 0.30000000000000004,
        };
        assert!(e.to_string().contains("grid point 3"));
    }
}
