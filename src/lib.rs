// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! Blasius boundary layer solved by the shooting method: a fixed-step RK4 integrator of the
//! initial value problem wrapped in a secant iteration on the far-field condition f'(η_max) = 1.
///  Example#1
/// ```
/// use RustedBlasius::numerical::ShootingBVP::Blasius_shooting::solve_default;
/// let solution = solve_default((0.01, 5.0)).unwrap();
/// assert!((solution.wall_shear - 0.332).abs() < 1e-3);
/// ```
/// Example#2
/// ```
/// // plain integration with a trial value of f''(0)
/// use RustedBlasius::numerical::ShootingBVP::Blasius_RK4::integrate;
/// let trajectory = integrate(0.332, 8.0, 0.1);
/// assert_eq!(trajectory.len(), 81);
/// assert_eq!(trajectory.fpp[0], 0.332);
/// ```
pub mod numerical;
pub mod Examples;
pub mod Utils;
