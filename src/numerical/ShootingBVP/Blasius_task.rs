//! Blasius task read from a task document, see `Utils::task_parser` for the syntax.
//!
//! ```text
//! guesses
//! old: 0.01
//! new: 5.0
//! domain
//! eta_max: 8.0
//! step: 0.1
//! solver
//! tolerance: 1e-7
//! max_iterations: 100
//! output
//! loglevel: info
//! log_to_file: false
//! save_csv: blasius_profile
//! ```
//! Every section and key is optional, missing values keep their defaults.
use crate::Utils::task_parser::{DocumentMap, Value, parse_document_as};
use crate::numerical::ShootingBVP::Blasius_RK4::{DEFAULT_ETA_MAX, DEFAULT_STEP};
use crate::numerical::ShootingBVP::Blasius_errors::ShootingError;
use crate::numerical::ShootingBVP::Blasius_shooting::{
    BlasiusShootingSolver, BlasiusSolution, DEFAULT_GUESSES, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TOLERANCE, timestamped_log_name,
};
use log::{LevelFilter, info, warn};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task document: {0}")]
    Parse(String),
    #[error("[{section}] {key}: expected {expected}")]
    WrongType {
        section: String,
        key: String,
        expected: &'static str,
    },
    #[error(transparent)]
    Shooting(#[from] ShootingError),
}

const KNOWN_KEYS: [(&str, &[&str]); 4] = [
    ("guesses", &["old", "new"]),
    ("domain", &["eta_max", "step"]),
    ("solver", &["tolerance", "max_iterations"]),
    ("output", &["loglevel", "log_to_file", "save_csv", "save_txt"]),
];

#[derive(Debug, Clone, PartialEq)]
pub struct BlasiusTask {
    pub guesses: (f64, f64),
    pub eta_max: f64,
    pub step_size: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub loglevel: Option<LevelFilter>,
    pub log_to_file: bool,
    pub save_csv: Option<String>,
    pub save_txt: Option<String>,
}

impl Default for BlasiusTask {
    fn default() -> Self {
        Self {
            guesses: DEFAULT_GUESSES,
            eta_max: DEFAULT_ETA_MAX,
            step_size: DEFAULT_STEP,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            loglevel: None,
            log_to_file: false,
            save_csv: None,
            save_txt: None,
        }
    }
}

/// single value stored under [section] key, None if absent
fn single<'a>(
    doc: &'a DocumentMap,
    section: &str,
    key: &str,
    expected: &'static str,
) -> Result<Option<&'a Value>, TaskError> {
    match doc.get(section).and_then(|s| s.get(key)) {
        None => Ok(None),
        Some(values) if values.len() == 1 => Ok(values.first()),
        Some(_) => Err(wrong_type(section, key, expected)),
    }
}

fn wrong_type(section: &str, key: &str, expected: &'static str) -> TaskError {
    TaskError::WrongType {
        section: section.to_string(),
        key: key.to_string(),
        expected,
    }
}

fn get_float(doc: &DocumentMap, section: &str, key: &str) -> Result<Option<f64>, TaskError> {
    const EXPECTED: &str = "a number";
    single(doc, section, key, EXPECTED)?
        .map(|v| v.as_float().ok_or_else(|| wrong_type(section, key, EXPECTED)))
        .transpose()
}

fn get_count(doc: &DocumentMap, section: &str, key: &str) -> Result<Option<usize>, TaskError> {
    const EXPECTED: &str = "a non-negative integer";
    single(doc, section, key, EXPECTED)?
        .map(|v| {
            v.as_integer()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| wrong_type(section, key, EXPECTED))
        })
        .transpose()
}

fn get_bool(doc: &DocumentMap, section: &str, key: &str) -> Result<Option<bool>, TaskError> {
    const EXPECTED: &str = "true or false";
    single(doc, section, key, EXPECTED)?
        .map(|v| v.as_boolean().ok_or_else(|| wrong_type(section, key, EXPECTED)))
        .transpose()
}

/// any single value as text, so `save_csv: 2024` is a valid file name
fn get_text(doc: &DocumentMap, section: &str, key: &str) -> Result<Option<String>, TaskError> {
    Ok(single(doc, section, key, "a single value")?.map(|v| v.to_string()))
}

fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

impl BlasiusTask {
    pub fn from_document(input: &str) -> Result<Self, TaskError> {
        let doc = parse_document_as(input).map_err(TaskError::Parse)?;
        for (section, keys) in &doc {
            match KNOWN_KEYS.iter().find(|(name, _)| *name == section.as_str()) {
                None => warn!("unknown section '{}' ignored", section),
                Some((_, known)) => {
                    for key in keys.keys().filter(|k| !known.contains(&k.as_str())) {
                        warn!("unknown key '{}' in section '{}' ignored", key, section);
                    }
                }
            }
        }

        let mut task = BlasiusTask::default();
        if let Some(old) = get_float(&doc, "guesses", "old")? {
            task.guesses.0 = old;
        }
        if let Some(new) = get_float(&doc, "guesses", "new")? {
            task.guesses.1 = new;
        }
        if let Some(eta_max) = get_float(&doc, "domain", "eta_max")? {
            task.eta_max = eta_max;
        }
        if let Some(step) = get_float(&doc, "domain", "step")? {
            task.step_size = step;
        }
        if let Some(tolerance) = get_float(&doc, "solver", "tolerance")? {
            task.tolerance = tolerance;
        }
        if let Some(max_iterations) = get_count(&doc, "solver", "max_iterations")? {
            task.max_iterations = max_iterations;
        }
        if let Some(level) = get_text(&doc, "output", "loglevel")? {
            task.loglevel = Some(
                parse_level(&level).ok_or_else(|| {
                    wrong_type("output", "loglevel", "off, error, warn, info, debug or trace")
                })?,
            );
        }
        if let Some(log_to_file) = get_bool(&doc, "output", "log_to_file")? {
            task.log_to_file = log_to_file;
        }
        task.save_csv = get_text(&doc, "output", "save_csv")?;
        task.save_txt = get_text(&doc, "output", "save_txt")?;
        Ok(task)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TaskError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_document(&content)
    }

    /// solver configured from the task, logger included
    pub fn solver(&self) -> BlasiusShootingSolver {
        let mut solver = BlasiusShootingSolver::new();
        solver.guesses = self.guesses;
        solver.set_domain(self.eta_max, self.step_size);
        solver.set_tolerance(self.tolerance, self.max_iterations);
        if self.loglevel.is_some() || self.log_to_file {
            solver.log_level = self.loglevel;
            if self.log_to_file {
                solver.log_to_file = Some(timestamped_log_name());
            }
            solver.init_logger();
        }
        solver
    }

    /// solves the task and writes the requested result files
    pub fn run(&self) -> Result<BlasiusSolution, TaskError> {
        let mut solver = self.solver();
        let solution = solver.solve()?;
        if let Some(name) = &self.save_csv {
            solver.save_to_csv(Some(name.clone()))?;
        }
        if let Some(name) = &self.save_txt {
            solver.save_to_file(Some(name.clone()))?;
        }
        info!("task finished in {} iterations", solution.iterations);
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(BlasiusTask::from_document("").unwrap(), BlasiusTask::default());
    }

    #[test]
    fn test_full_document() {
        let input = "guesses\nold: 0.1\nnew: 1\ndomain\neta_max: 10\nstep: 0.05\nsolver\ntolerance: 1e-9\nmax_iterations: 40\noutput\nloglevel: debug\nlog_to_file: false\nsave_csv: profile\nsave_txt: 2024";
        let task = BlasiusTask::from_document(input).unwrap();
        assert_eq!(task.guesses, (0.1, 1.0));
        assert_eq!(task.eta_max, 10.0);
        assert_eq!(task.step_size, 0.05);
        assert_eq!(task.tolerance, 1e-9);
        assert_eq!(task.max_iterations, 40);
        assert_eq!(task.loglevel, Some(LevelFilter::Debug));
        assert!(!task.log_to_file);
        assert_eq!(task.save_csv.as_deref(), Some("profile"));
        assert_eq!(task.save_txt.as_deref(), Some("2024"));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let task = BlasiusTask::from_document("solver max_iterations: 7").unwrap();
        assert_eq!(task.max_iterations, 7);
        assert_eq!(task.guesses, DEFAULT_GUESSES);
        assert_eq!(task.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_wrong_types() {
        let err = BlasiusTask::from_document("domain step: fast").unwrap_err();
        assert!(matches!(err, TaskError::WrongType { ref key, .. } if key == "step"));

        let err = BlasiusTask::from_document("solver max_iterations: -3").unwrap_err();
        assert!(matches!(err, TaskError::WrongType { .. }));

        let err = BlasiusTask::from_document("guesses old: 0.1, 0.2").unwrap_err();
        assert!(matches!(err, TaskError::WrongType { .. }));

        let err = BlasiusTask::from_document("output loglevel: loud").unwrap_err();
        assert!(matches!(err, TaskError::WrongType { .. }));

        let err = BlasiusTask::from_document("domain").unwrap_err();
        assert!(matches!(err, TaskError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = BlasiusTask::from_file("/definitely/not/here.task").unwrap_err();
        assert!(matches!(err, TaskError::Io(_)));
    }

    #[test]
    fn test_run_writes_csv() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("profile");
        let input = format!("output save_csv: {}", base.display());
        let task = BlasiusTask::from_document(&input).unwrap();
        let solution = task.run().unwrap();
        assert_abs_diff_eq!(solution.wall_shear, 0.332, epsilon = 1e-3);

        let mut reader = csv::Reader::from_path(dir.path().join("profile.csv")).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["eta", "f", "fp", "fpp"]
        );
        assert_eq!(reader.records().count(), 81);
    }

    #[test]
    fn test_run_reports_solver_failure() {
        let task = BlasiusTask::from_document("solver max_iterations: 0").unwrap();
        let err = task.run().unwrap_err();
        assert!(matches!(
            err,
            TaskError::Shooting(ShootingError::InvalidParameter(_))
        ));
    }
}
