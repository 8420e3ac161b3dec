//! numerical part of the crate
/// Blasius boundary layer: RK4 integrator, secant shooting solver and post-processing
///  ```
/// use RustedBlasius::numerical::ShootingBVP::Blasius_shooting::BlasiusShootingSolver;
/// let mut solver = BlasiusShootingSolver::new();
/// solver.set_guesses(0.01, 5.0);
/// solver.set_tolerance(1e-7, 100);
/// solver.set_domain(8.0, 0.1);
/// let solution = solver.solve().unwrap();
/// println!("f''(0) = {}, iterations = {}", solution.wall_shear, solution.iterations);
/// ```
pub mod ShootingBVP;
