//!
//! # ShootingBVP - Blasius boundary layer by the shooting method
//!
//! The Blasius equation f''' + 0.5·f·f'' = 0 with f(0) = f'(0) = 0 and f'(∞) = 1 is solved by
//! integrating the initial value problem with a fixed-step RK4 scheme and tuning f''(0) with the
//! secant method until f'(η_max) = 1.
//!
//! ## Module Structure
//! - `Blasius_RK4`: RK4 integrator, uniform grid and trajectory type
//! - `Blasius_secant`: secant iteration over a residual closure
//! - `Blasius_shooting`: shooting solver with logging, statistics and result saving
//! - `Blasius_errors`: error taxonomy of the solver
//! - `Blasius_properties`: wall and integral quantities of a converged profile
//! - `Blasius_task`: solver configuration from a task document
//!
/// fixed-step RK4 integrator of the Blasius system
pub mod Blasius_RK4;
pub mod Blasius_errors;
pub mod Blasius_properties;
pub mod Blasius_secant;
/// shooting solver: secant method wrapped around the RK4 integrator
pub mod Blasius_shooting;
pub mod Blasius_task;
