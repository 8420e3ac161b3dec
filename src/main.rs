#![allow(non_snake_case)]
use RustedBlasius::Examples::blasius_examples::blasius_examples;
use RustedBlasius::numerical::ShootingBVP::Blasius_task::{BlasiusTask, TaskError};
use std::env;
use std::process::ExitCode;

/// `RustedBlasius` runs example 0, `RustedBlasius 3` runs example 3,
/// `RustedBlasius blasius_task.txt` solves the task written in the file
fn main() -> ExitCode {
    let result: Result<(), TaskError> = match env::args().nth(1) {
        None => blasius_examples(0),
        Some(arg) => match arg.parse::<usize>() {
            Ok(example) => blasius_examples(example),
            Err(_) => BlasiusTask::from_file(&arg)
                .and_then(|task| task.run())
                .map(|solution| {
                    println!(
                        "f''(0) = {}, f'(eta_max) = {}, iterations = {}",
                        solution.wall_shear, solution.fp_end, solution.iterations
                    );
                }),
        },
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
