//! # Shooting method for the Blasius boundary layer
//!
//! The Blasius problem f''' + 0.5·f·f'' = 0, f(0) = 0, f'(0) = 0, f'(∞) = 1 is a two-point
//! boundary value problem. The far-field condition is imposed at a finite η_max, and the unknown
//! wall curvature s = f''(0) is found with the secant method on the residual
//!
//! R(s) = f'(η_max; s) - 1
//!
//! where every evaluation of R is one RK4 integration of the initial value problem.
//!
//! ## Parameters
//! - **guesses**: two seed values of f''(0)
//! - **tolerance**: convergence tolerance on |R| (default 1e-7)
//! - **max_iterations**: cap on the secant iterations (default 100)
//! - **eta_max**: right end of the domain (default 8.0)
//! - **step_size**: RK4 step (default 0.1)
//!
//! ## Usage Example
//! ```rust, ignore
//! use RustedBlasius::numerical::ShootingBVP::Blasius_shooting::BlasiusShootingSolver;
//! let mut solver = BlasiusShootingSolver::new();
//! solver.set_guesses(0.01, 5.0);
//! let solution = solver.solve().unwrap();
//! println!("f''(0) = {}", solution.wall_shear);
//! solver.save_to_csv(Some("blasius".to_string())).unwrap();
//! ```
use crate::Utils::save_results::{save_matrix_to_csv, save_matrix_to_file};
use crate::numerical::ShootingBVP::Blasius_RK4::{
    BlasiusTrajectory, DEFAULT_ETA_MAX, DEFAULT_STEP, MAX_GRID_INTERVALS, integrate,
};
use crate::numerical::ShootingBVP::Blasius_errors::ShootingError;
use crate::numerical::ShootingBVP::Blasius_properties::BoundaryLayerProperties;
use crate::numerical::ShootingBVP::Blasius_secant::secant_shooting;
use chrono::Local;
use log::{error, info, warn};
use nalgebra::DVector;
use simplelog::*;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::time::Instant;
use tabled::{builder::Builder, settings::Style};

pub const DEFAULT_TOLERANCE: f64 = 1e-7;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
/// seed guesses of f''(0) used when none are given
pub const DEFAULT_GUESSES: (f64, f64) = (0.01, 5.0);

/// `log_<date>_<time>.txt`
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// converged Blasius profile
#[derive(Debug, Clone)]
pub struct BlasiusSolution {
    pub trajectory: BlasiusTrajectory,
    /// converged trial parameter f''(0)
    pub wall_shear: f64,
    /// f' at the last grid point
    pub fp_end: f64,
    /// fp_end - 1
    pub residual: f64,
    pub iterations: usize,
    pub residual_history: Vec<f64>,
}

impl BlasiusSolution {
    pub fn eta(&self) -> &DVector<f64> {
        &self.trajectory.eta
    }
    pub fn f(&self) -> &DVector<f64> {
        &self.trajectory.f
    }
    pub fn fp(&self) -> &DVector<f64> {
        &self.trajectory.fp
    }
    pub fn fpp(&self) -> &DVector<f64> {
        &self.trajectory.fpp
    }
    pub fn properties(&self) -> BoundaryLayerProperties {
        BoundaryLayerProperties::from_trajectory(&self.trajectory)
    }
}

/// Configuration, logging options and result of the shooting solver.
pub struct BlasiusShootingSolver {
    pub guesses: (f64, f64),
    pub tolerance: f64,
    pub max_iterations: usize,
    pub eta_max: f64,
    pub step_size: f64,
    pub log_level: Option<LevelFilter>,
    pub log_to_file: Option<String>,
    pub log_to_console: bool,
    pub calc_statistics: HashMap<String, String>,
    pub result: Option<BlasiusSolution>,
}

impl Default for BlasiusShootingSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BlasiusShootingSolver {
    pub fn new() -> Self {
        Self {
            guesses: DEFAULT_GUESSES,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            eta_max: DEFAULT_ETA_MAX,
            step_size: DEFAULT_STEP,
            log_level: None,
            log_to_file: None,
            log_to_console: true,
            calc_statistics: HashMap::new(),
            result: None,
        }
    }

    pub fn set_guesses(&mut self, guess_old: f64, guess_new: f64) {
        self.guesses = (guess_old, guess_new);
    }

    pub fn set_domain(&mut self, eta_max: f64, step_size: f64) {
        self.eta_max = eta_max;
        self.step_size = step_size;
    }

    pub fn set_tolerance(&mut self, tolerance: f64, max_iterations: usize) {
        self.tolerance = tolerance;
        self.max_iterations = max_iterations;
    }

    /// Rejects parameters for which the shooting problem is not defined
    pub fn check_task(&self) -> Result<(), ShootingError> {
        let (g_old, g_new) = self.guesses;
        if !(g_old.is_finite() && g_new.is_finite()) {
            return Err(ShootingError::InvalidParameter(format!(
                "guesses must be finite, got ({}, {})",
                g_old, g_new
            )));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ShootingError::InvalidParameter(format!(
                "step size must be positive, got {}",
                self.step_size
            )));
        }
        if !(self.eta_max.is_finite() && self.eta_max > 0.0) {
            return Err(ShootingError::InvalidParameter(format!(
                "eta_max must be positive, got {}",
                self.eta_max
            )));
        }
        if self.eta_max / self.step_size > MAX_GRID_INTERVALS as f64 {
            return Err(ShootingError::InvalidParameter(format!(
                "step {} is too small for eta_max = {}, the grid is limited to {} intervals",
                self.step_size, self.eta_max, MAX_GRID_INTERVALS
            )));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 || self.tolerance.is_infinite() {
            return Err(ShootingError::InvalidParameter(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(ShootingError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Solves the Blasius problem with the shooting method
    pub fn solve(&mut self) -> Result<BlasiusSolution, ShootingError> {
        self.check_task()?;
        info!("Starting Blasius shooting solver");
        info!(
            "guesses = {:?}, tolerance = {}, max_iterations = {}, eta_max = {}, step = {}",
            self.guesses, self.tolerance, self.max_iterations, self.eta_max, self.step_size
        );
        let (eta_max, h) = (self.eta_max, self.step_size);
        let mut ivp_solves: usize = 0;
        let shoot = |guess: f64| -> Result<(f64, BlasiusTrajectory), ShootingError> {
            ivp_solves += 1;
            let trajectory = integrate(guess, eta_max, h);
            if let Some((index, eta)) = trajectory.first_non_finite() {
                warn!(
                    "integration with f''(0) = {} blew up at eta = {} (grid point {})",
                    guess, eta, index
                );
                return Err(ShootingError::NonFiniteState { guess, index, eta });
            }
            Ok((trajectory.residual(), trajectory))
        };

        let begin = Instant::now();
        let outcome = secant_shooting(self.guesses, self.tolerance, self.max_iterations, shoot);
        let elapsed = begin.elapsed();

        self.calc_statistics.clear();
        self.calc_statistics
            .insert("number of IVP solves".to_string(), ivp_solves.to_string());
        self.calc_statistics.insert(
            "time elapsed, ms".to_string(),
            format!("{:.3}", elapsed.as_secs_f64() * 1e3),
        );
        match outcome {
            Ok(outcome) => {
                let trajectory = outcome.payload;
                let fp_end = trajectory.fp[trajectory.len() - 1];
                let solution = BlasiusSolution {
                    wall_shear: outcome.root,
                    fp_end,
                    residual: outcome.residual,
                    iterations: outcome.iterations,
                    residual_history: outcome.residual_history,
                    trajectory,
                };
                info!(
                    "Found f''(0) = {}, f'({}) = {}",
                    solution.wall_shear,
                    solution.eta()[solution.trajectory.len() - 1],
                    fp_end
                );
                self.calc_statistics.insert(
                    "secant iterations".to_string(),
                    solution.iterations.to_string(),
                );
                self.calc_statistics
                    .insert("f''(0)".to_string(), solution.wall_shear.to_string());
                self.calc_statistics
                    .insert("final residual".to_string(), solution.residual.to_string());
                self.calc_statistics();
                self.result = Some(solution.clone());
                Ok(solution)
            }
            Err(e) => {
                error!("Blasius shooting failed: {}", e);
                self.calc_statistics
                    .insert("failure".to_string(), e.kind().to_string());
                self.calc_statistics();
                self.result = None;
                Err(e)
            }
        }
    }

    /// Pretty-prints the statistics of the last run
    pub fn calc_statistics(&self) -> String {
        let mut table = Builder::from(self.calc_statistics.clone()).build();
        table.with(Style::modern_rounded());
        let table = table.to_string();
        info!("\n \n CALC STATISTICS \n \n {}", table);
        table
    }

    ////////////////////////////////logging functions
    /// Set logging level (Off, Error, Warn, Info, Debug, Trace)
    pub fn set_log_level(&mut self, level: LevelFilter) {
        self.log_level = Some(level);
        self.init_logger();
    }

    /// Enable logging to file
    pub fn set_log_file(&mut self, filename: String) {
        self.log_to_file = Some(filename);
        self.init_logger();
    }

    /// Log file named after the current date and time
    pub fn set_log_file_timestamped(&mut self) {
        self.set_log_file(timestamped_log_name());
    }

    /// Enable/disable console logging
    pub fn set_console_logging(&mut self, enabled: bool) {
        self.log_to_console = enabled;
        self.init_logger();
    }

    pub fn disable_logging(&mut self) {
        self.set_log_level(LevelFilter::Off);
    }

    /// level the global logger is filtered at: `Off` when no sink is enabled
    pub fn effective_log_level(&self) -> LevelFilter {
        if !self.log_to_console && self.log_to_file.is_none() {
            return LevelFilter::Off;
        }
        self.log_level.unwrap_or(LevelFilter::Info)
    }

    /// Installs console and file loggers. The global logger can be set only once per process,
    /// later calls only change the maximum level.
    pub fn init_logger(&self) {
        let level = self.effective_log_level();
        let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
        if self.log_to_console {
            loggers.push(TermLogger::new(
                level,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            ));
        }
        if let Some(ref filename) = self.log_to_file {
            if let Ok(file) = File::create(filename) {
                loggers.push(WriteLogger::new(level, Config::default(), file));
            }
        }
        if !loggers.is_empty() {
            let _ = CombinedLogger::init(loggers);
        }
        log::set_max_level(level);
    }

    ////////////////////////////////////////////////////////////////////////////////////
    //                 functions to return and save result
    ////////////////////////////////////////////////////////////////////////////////////
    pub fn get_solution(&self) -> Option<BlasiusSolution> {
        self.result.clone()
    }

    pub fn get_eta(&self) -> Option<DVector<f64>> {
        self.result.as_ref().map(|s| s.trajectory.eta.clone())
    }

    fn saved_result(&self) -> io::Result<&BlasiusSolution> {
        self.result.as_ref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no converged solution to save")
        })
    }

    fn headers() -> Vec<String> {
        vec!["f".to_string(), "fp".to_string(), "fpp".to_string()]
    }

    /// saves eta, f, fp, fpp into `<name>.csv` (default `blasius.csv`), returns the file name
    pub fn save_to_csv(&self, filename: Option<String>) -> io::Result<String> {
        let solution = self.saved_result()?;
        let name = format!("{}.csv", filename.unwrap_or_else(|| "blasius".to_string()));
        save_matrix_to_csv(
            &solution.trajectory.to_matrix(),
            &Self::headers(),
            &name,
            &solution.trajectory.eta,
            "eta",
        )?;
        info!("result saved to {}", name);
        Ok(name)
    }

    /// tab-separated twin of `save_to_csv`, writes `<name>.txt`
    pub fn save_to_file(&self, filename: Option<String>) -> io::Result<String> {
        let solution = self.saved_result()?;
        let name = format!("{}.txt", filename.unwrap_or_else(|| "blasius".to_string()));
        save_matrix_to_file(
            &solution.trajectory.to_matrix(),
            &Self::headers(),
            &name,
            &solution.trajectory.eta,
            "eta",
        )?;
        info!("result saved to {}", name);
        Ok(name)
    }
}

/// Shooting solve with an explicit domain and 100 secant iterations at most
pub fn solve(
    guesses: (f64, f64),
    tol: f64,
    eta_max: f64,
    h: f64,
) -> Result<BlasiusSolution, ShootingError> {
    let mut solver = BlasiusShootingSolver::new();
    solver.guesses = guesses;
    solver.set_tolerance(tol, DEFAULT_MAX_ITERATIONS);
    solver.set_domain(eta_max, h);
    solver.solve()
}

/// `solve` with tolerance 1e-7 on [0, 8] with h = 0.1
pub fn solve_default(guesses: (f64, f64)) -> Result<BlasiusSolution, ShootingError> {
    solve(guesses, DEFAULT_TOLERANCE, DEFAULT_ETA_MAX, DEFAULT_STEP)
}
