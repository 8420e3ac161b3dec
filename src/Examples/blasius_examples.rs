#![allow(non_snake_case)]
use crate::numerical::ShootingBVP::Blasius_RK4::integrate;
use crate::numerical::ShootingBVP::Blasius_errors::ShootingError;
use crate::numerical::ShootingBVP::Blasius_shooting::{BlasiusShootingSolver, solve};
use crate::numerical::ShootingBVP::Blasius_task::{BlasiusTask, TaskError};
use tabled::{builder::Builder, settings::Style};

/// number of examples known to `blasius_examples`
pub const NUMBER_OF_EXAMPLES: usize = 6;

pub fn blasius_examples(example: usize) -> Result<(), TaskError> {
    match example {
        0 => {
            // the classical problem: seeds 0.01 and 5.0, eta in [0, 8], h = 0.1
            let mut solver = BlasiusShootingSolver::new();
            solver.set_guesses(0.01, 5.0);
            let solution = solver.solve()?;
            println!(
                "f''(0) = {}, f'(8) = {}, iterations = {}",
                solution.wall_shear, solution.fp_end, solution.iterations
            );
            println!("{}", solver.calc_statistics());
            let props = solution.properties();
            println!("boundary layer: {:?}", props);
            println!(
                "Cf*sqrt(Re_x) = {}",
                props.skin_friction_coefficient()
            );
        }
        1 => {
            // the same problem from a task document
            let document = r#"
            // Blasius task
            guesses
            old: 0.1
            new: 1.0
            domain
            eta_max: 10.0
            step: 0.05
            solver
            tolerance: 1e-9
            max_iterations: 50
            "#;
            let task = BlasiusTask::from_document(document)?;
            println!("task = {:?}", task);
            let solution = task.run()?;
            println!(
                "f''(0) = {} after {} iterations",
                solution.wall_shear, solution.iterations
            );
        }
        2 => {
            // step size study: RK4 is fourth order, f''(0) settles quickly.
            // Steps above 0.1 put the 5.0 seed outside the RK4 stability region near eta = 8.
            let mut builder = Builder::default();
            builder.push_record(["h", "f''(0)", "iterations"]);
            for h in [0.1, 0.05, 0.025, 0.0125] {
                match solve((0.01, 5.0), 1e-10, 8.0, h) {
                    Ok(solution) => {
                        builder.push_record([
                            h.to_string(),
                            format!("{:.10}", solution.wall_shear),
                            solution.iterations.to_string(),
                        ]);
                    }
                    Err(e) => {
                        builder.push_record([h.to_string(), e.to_string(), e.kind().to_string()]);
                    }
                }
            }
            let mut table = builder.build();
            table.with(Style::modern_rounded());
            println!("{}", table);
        }
        3 => {
            // far-field position study: a short domain pulls f''(0) away from 0.33206
            let mut builder = Builder::default();
            builder.push_record(["eta_max", "f''(0)", "displacement thickness"]);
            for eta_max in [4.0, 6.0, 8.0, 10.0, 12.0] {
                match solve((0.01, 5.0), 1e-10, eta_max, 0.05) {
                    Ok(solution) => {
                        builder.push_record([
                            eta_max.to_string(),
                            format!("{:.8}", solution.wall_shear),
                            format!("{:.6}", solution.properties().displacement_thickness),
                        ]);
                    }
                    Err(e) => {
                        builder.push_record([
                            eta_max.to_string(),
                            e.to_string(),
                            e.kind().to_string(),
                        ]);
                    }
                }
            }
            let mut table = builder.build();
            table.with(Style::modern_rounded());
            println!("{}", table);
        }
        4 => {
            // failures are reported, never retried
            let failures: [(&str, Result<_, ShootingError>); 3] = [
                ("identical seeds", solve((0.5, 0.5), 1e-7, 8.0, 0.1)),
                ("blow up", solve((0.01, -1e120), 1e-7, 8.0, 0.1)),
                ("zero tolerance", {
                    let mut solver = BlasiusShootingSolver::new();
                    solver.set_tolerance(0.0, 5);
                    solver.solve()
                }),
            ];
            for (name, result) in failures {
                match result {
                    Ok(solution) => println!("{}: converged to {}", name, solution.wall_shear),
                    Err(e) => println!("{}: {} ({})", name, e, e.kind()),
                }
            }
            let trajectory = integrate(-1e120, 8.0, 0.1);
            println!(
                "first non-finite grid point: {:?}",
                trajectory.first_non_finite()
            );
        }
        5 => {
            // profile saved for an external plotting tool
            let mut solver = BlasiusShootingSolver::new();
            solver.solve()?;
            let csv = solver.save_to_csv(Some("blasius_profile".to_string()))?;
            let txt = solver.save_to_file(Some("blasius_profile".to_string()))?;
            println!("saved {} and {}", csv, txt);
        }
        _ => {
            println!(
                "example {} does not exist, choose from 0..{}",
                example, NUMBER_OF_EXAMPLES
            );
        }
    }
    Ok(())
}
