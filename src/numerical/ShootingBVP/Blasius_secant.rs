//! Secant root finder used by the shooting solver.
//!
//! The residual closure returns the zero-shifted residual together with a payload (the
//! trajectory in the Blasius case), so the payload of the converged evaluation can be handed back
//! without integrating once more.
use crate::numerical::ShootingBVP::Blasius_errors::ShootingError;
use log::{debug, error, info};

/// rolling state of the secant iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantState {
    pub guess_old: f64,
    pub residual_old: f64,
    pub guess_new: f64,
}

impl SecantState {
    pub fn new(guess_old: f64, residual_old: f64, guess_new: f64) -> Self {
        Self {
            guess_old,
            residual_old,
            guess_new,
        }
    }

    /// Secant update with the residual of `guess_new`. Shifts the state and returns the next guess.
    pub fn advance(&mut self, residual_new: f64) -> Result<f64, ShootingError> {
        let denominator = residual_new - self.residual_old;
        if denominator == 0.0 {
            return Err(ShootingError::DegenerateSecantStep {
                guess_old: self.guess_old,
                guess_new: self.guess_new,
                residual: residual_new,
            });
        }
        let guess_next =
            self.guess_new - residual_new * (self.guess_new - self.guess_old) / denominator;
        self.guess_old = self.guess_new;
        self.residual_old = residual_new;
        self.guess_new = guess_next;
        Ok(guess_next)
    }
}

/// converged secant run
#[derive(Debug, Clone)]
pub struct SecantOutcome<T> {
    pub root: f64,
    pub residual: f64,
    pub iterations: usize,
    pub payload: T,
    /// residual of every guess evaluated inside the loop
    pub residual_history: Vec<f64>,
}

/// Secant method over a residual closure.
///
/// `shoot` is called once for the old guess and once per iteration for the new one. Iterations
/// are counted from 1, so a first new guess already inside the tolerance band gives
/// `iterations == 1`.
pub fn secant_shooting<F, T>(
    guesses: (f64, f64),
    tolerance: f64,
    max_iterations: usize,
    mut shoot: F,
) -> Result<SecantOutcome<T>, ShootingError>
where
    F: FnMut(f64) -> Result<(f64, T), ShootingError>,
{
    debug!(
        "Starting secant method with guesses=({}, {}), tolerance={}, max_iterations={}",
        guesses.0, guesses.1, tolerance, max_iterations
    );
    let (residual_old, _) = shoot(guesses.0)?;
    let mut state = SecantState::new(guesses.0, residual_old, guesses.1);
    let mut residual_history = Vec::with_capacity(max_iterations);
    let mut last_residual = residual_old;

    for iteration in 1..=max_iterations {
        let guess = state.guess_new;
        let (residual_new, payload) = shoot(guess)?;
        residual_history.push(residual_new);
        last_residual = residual_new;
        debug!(
            "Iteration {}: guess={}, residual={}",
            iteration, guess, residual_new
        );

        if residual_new.abs() < tolerance {
            info!(
                "Secant method converged after {} iterations with x={}, f(x)={}",
                iteration, guess, residual_new
            );
            return Ok(SecantOutcome {
                root: guess,
                residual: residual_new,
                iterations: iteration,
                payload,
                residual_history,
            });
        }
        state.advance(residual_new)?;
    }

    error!(
        "Secant method did not converge after {} iterations",
        max_iterations
    );
    Err(ShootingError::NonConvergence {
        max_iterations,
        guess: state.guess_old,
        residual: last_residual,
    })
}
