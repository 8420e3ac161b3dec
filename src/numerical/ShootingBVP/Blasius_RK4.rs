//! # Fixed-step RK4 integrator for the Blasius equation
//!
//! The third-order Blasius equation f''' + 0.5·f·f'' = 0 is rewritten as the first-order system
//!
//! d/dη [f, f', f''] = [f', f'', -0.5·f·f'']
//!
//! and integrated from η = 0 with the initial state f(0) = 0, f'(0) = 0, f''(0) = s, where `s`
//! is the trial parameter tuned by the shooting solver.
//!
//! ## Grid
//! The grid is uniform: η_i = i·h for i = 0..=n with n = ⌈eta_max/h⌉. A ratio eta_max/h lying
//! within a relative 1e-9 of an integer is snapped to that integer, so 8.0/0.1 gives exactly 81
//! points. When eta_max is not a multiple of h the last point overshoots eta_max by less than one
//! step. The grid never holds more than `MAX_GRID_INTERVALS` intervals: a step too small for
//! the domain is clamped there, and the grid then stops short of eta_max.
//!
//! ## Usage Example
//! ```rust, ignore
//! use RustedBlasius::numerical::ShootingBVP::Blasius_RK4::integrate;
//! let trajectory = integrate(0.332, 8.0, 0.1);
//! println!("f'(8) = {}", trajectory.fp[trajectory.len() - 1]);
//! ```

use nalgebra::{DMatrix, DVector, Vector3};

/// state of the system (f, f', f'') at one grid point
pub type State = Vector3<f64>;

pub const DEFAULT_ETA_MAX: f64 = 8.0;
pub const DEFAULT_STEP: f64 = 0.1;

/// relative slack used to snap eta_max/h to an integer number of intervals
const GRID_SNAP_TOLERANCE: f64 = 1e-9;

/// upper bound on the number of grid intervals of one integration
pub const MAX_GRID_INTERVALS: usize = 1_000_000;

/// Right-hand side of the Blasius system
#[inline]
pub fn blasius_rhs(s: &State) -> State {
    State::new(s[1], s[2], -0.5 * s[0] * s[2])
}

/// One classical RK4 step of size h
#[inline]
pub fn rk4_step(s: &State, h: f64) -> State {
    let k1 = h * blasius_rhs(s);
    let k2 = h * blasius_rhs(&(s + 0.5 * k1));
    let k3 = h * blasius_rhs(&(s + 0.5 * k2));
    let k4 = h * blasius_rhs(&(s + k3));
    s + (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
}

/// Number of grid intervals for the domain [0, eta_max] with step h.
/// Returns 0 for a degenerate domain or step, at most `MAX_GRID_INTERVALS`.
pub fn number_of_intervals(eta_max: f64, h: f64) -> usize {
    if !(eta_max.is_finite() && h.is_finite()) || eta_max <= 0.0 || h <= 0.0 {
        return 0;
    }
    let ratio = eta_max / h;
    if !ratio.is_finite() || ratio >= MAX_GRID_INTERVALS as f64 {
        return MAX_GRID_INTERVALS;
    }
    let rounded = ratio.round();
    let n = if (ratio - rounded).abs() <= GRID_SNAP_TOLERANCE * rounded.max(1.0) {
        rounded as usize
    } else {
        ratio.ceil() as usize
    };
    n.min(MAX_GRID_INTERVALS)
}

/// uniform grid η_i = i·h, i = 0..=n
pub fn create_mesh(eta_max: f64, h: f64) -> DVector<f64> {
    let n = number_of_intervals(eta_max, h);
    DVector::from_fn(n + 1, |i, _| i as f64 * h)
}

/// Numerical solution of the Blasius system on a uniform grid.
/// All four vectors have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct BlasiusTrajectory {
    pub eta: DVector<f64>,
    pub f: DVector<f64>,
    pub fp: DVector<f64>,
    pub fpp: DVector<f64>,
}

impl BlasiusTrajectory {
    fn with_capacity(eta: DVector<f64>) -> Self {
        let n = eta.len();
        Self {
            eta,
            f: DVector::zeros(n),
            fp: DVector::zeros(n),
            fpp: DVector::zeros(n),
        }
    }

    fn set_state(&mut self, i: usize, s: &State) {
        self.f[i] = s[0];
        self.fp[i] = s[1];
        self.fpp[i] = s[2];
    }

    pub fn len(&self) -> usize {
        self.eta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eta.is_empty()
    }

    pub fn state_at(&self, i: usize) -> State {
        State::new(self.f[i], self.fp[i], self.fpp[i])
    }

    /// state at the last grid point
    pub fn last_state(&self) -> State {
        self.state_at(self.len() - 1)
    }

    /// trial parameter the trajectory was started from
    pub fn wall_shear(&self) -> f64 {
        self.fpp[0]
    }

    /// f' at the last grid point minus its far-field value 1
    pub fn residual(&self) -> f64 {
        self.fp[self.len() - 1] - 1.0
    }

    /// Index and η of the first grid point holding a non-finite component
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        (0..self.len())
            .find(|&i| !self.state_at(i).iter().all(|v| v.is_finite()))
            .map(|i| (i, self.eta[i]))
    }

    /// N×3 matrix with columns f, f', f''
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_columns(&[self.f.clone(), self.fp.clone(), self.fpp.clone()])
    }
}

/// Integrates the Blasius system with the classical RK4 scheme.
///
/// # Arguments
/// * `f1_0` - trial value of f''(0).
/// * `eta_max` - upper bound of the domain.
/// * `h` - step size.
///
/// # Returns
/// * `BlasiusTrajectory` - every grid point is retained, not only the last one. The integrator
///   never fails: a badly chosen `f1_0` may give non-finite values, which is for the caller to judge.
pub fn integrate(f1_0: f64, eta_max: f64, h: f64) -> BlasiusTrajectory {
    let eta = create_mesh(eta_max, h);
    let n_points = eta.len();
    let mut trajectory = BlasiusTrajectory::with_capacity(eta);

    let mut s = State::new(0.0, 0.0, f1_0);
    trajectory.set_state(0, &s);
    for i in 1..n_points {
        s = rk4_step(&s, h);
        trajectory.set_state(i, &s);
    }
    trajectory
}

/// `integrate` on the default domain [0, 8] with h = 0.1
pub fn integrate_default(f1_0: f64) -> BlasiusTrajectory {
    integrate(f1_0, DEFAULT_ETA_MAX, DEFAULT_STEP)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_grid_default_domain() {
        let eta = create_mesh(8.0, 0.1);
        assert_eq!(eta.len(), 81);
        assert_eq!(eta[0], 0.0);
        assert_abs_diff_eq!(eta[80], 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grid_properties() {
        for &(eta_max, h) in &[(8.0, 0.1), (1.0, 0.3), (5.0, 0.25), (10.0, 0.07), (0.05, 0.1)] {
            let eta = create_mesh(eta_max, h);
            let expected = (eta_max / h - 1e-9_f64).ceil() as usize + 1;
            assert_eq!(eta.len(), expected, "eta_max = {}, h = {}", eta_max, h);
            assert_eq!(eta[0], 0.0);
            for i in 1..eta.len() {
                assert!(eta[i] > eta[i - 1]);
                assert_abs_diff_eq!(eta[i] - eta[i - 1], h, epsilon = 1e-12);
            }
            // covers eta_max and overshoots it by less than one step
            let last = eta[eta.len() - 1];
            assert!(last >= eta_max - 1e-12);
            assert!(last < eta_max + h);
        }
    }

    #[test]
    fn test_degenerate_grid() {
        assert_eq!(create_mesh(0.0, 0.1).len(), 1);
        assert_eq!(create_mesh(1.0, 0.0).len(), 1);
        assert_eq!(create_mesh(1.0, -0.1).len(), 1);
        assert_eq!(create_mesh(f64::NAN, 0.1).len(), 1);
        let trajectory = integrate(0.5, 1.0, 0.0);
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.fpp[0], 0.5);
    }

    #[test]
    fn test_tiny_step_is_clamped() {
        assert_eq!(number_of_intervals(8.0, 1e-300), MAX_GRID_INTERVALS);
        assert_eq!(number_of_intervals(1e300, 1e-300), MAX_GRID_INTERVALS);
        assert_eq!(number_of_intervals(1.0, 1.0 / MAX_GRID_INTERVALS as f64), MAX_GRID_INTERVALS);
        let trajectory = integrate(0.332, 8.0, 1e-300);
        assert_eq!(trajectory.len(), MAX_GRID_INTERVALS + 1);
        assert_eq!(trajectory.fpp[0], 0.332);
        assert!(trajectory.first_non_finite().is_none());
    }

    #[test]
    fn test_initial_condition() {
        for &s in &[0.0, 0.332, 1.0, -0.2, 5.0] {
            let trajectory = integrate_default(s);
            assert_eq!(trajectory.f[0], 0.0);
            assert_eq!(trajectory.fp[0], 0.0);
            assert_eq!(trajectory.fpp[0], s);
            assert_eq!(trajectory.wall_shear(), s);
        }
    }

    #[test]
    fn test_equal_lengths() {
        let trajectory = integrate(0.4, 3.3, 0.2);
        let n = trajectory.len();
        assert_eq!(trajectory.f.len(), n);
        assert_eq!(trajectory.fp.len(), n);
        assert_eq!(trajectory.fpp.len(), n);
        assert_eq!(trajectory.to_matrix().shape(), (n, 3));
    }

    #[test]
    fn test_zero_trial_parameter_is_trivial_solution() {
        let trajectory = integrate_default(0.0);
        assert!(trajectory.f.iter().all(|&v| v == 0.0));
        assert!(trajectory.fp.iter().all(|&v| v == 0.0));
        assert!(trajectory.fpp.iter().all(|&v| v == 0.0));
        assert_eq!(trajectory.residual(), -1.0);
    }

    #[test]
    fn test_rk4_step_matches_taylor_series_near_wall() {
        // near the wall f = s·η²/2 - s²·η⁵/240 + O(η⁸)
        let s = 0.332;
        let h = 0.1;
        let next = rk4_step(&State::new(0.0, 0.0, s), h);
        let f_exact = s * h * h / 2.0 - s * s * h.powi(5) / 240.0;
        let fp_exact = s * h - s * s * h.powi(4) / 48.0;
        assert_abs_diff_eq!(next[0], f_exact, epsilon = 1e-8);
        assert_abs_diff_eq!(next[1], fp_exact, epsilon = 1e-8);
    }

    #[test]
    fn test_rhs() {
        let s = State::new(2.0, 3.0, 4.0);
        let d = blasius_rhs(&s);
        assert_eq!(d, State::new(3.0, 4.0, -4.0));
    }

    #[test]
    fn test_fourth_order_convergence() {
        // halving h reduces the error in f'(4) roughly 16 times
        let reference = integrate(0.332, 4.0, 0.0125).fp[320];
        let coarse = integrate(0.332, 4.0, 0.2).fp[20];
        let fine = integrate(0.332, 4.0, 0.1).fp[40];
        let ratio = (coarse - reference).abs() / (fine - reference).abs();
        assert!(ratio > 8.0 && ratio < 32.0, "ratio = {}", ratio);
    }

    #[test]
    fn test_blow_up_reported_as_non_finite() {
        // a huge negative curvature drives f·f'' to overflow
        let trajectory = integrate(-1e120, 8.0, 0.1);
        let (index, eta) = trajectory.first_non_finite().unwrap();
        assert!(index > 0);
        assert_abs_diff_eq!(eta, index as f64 * 0.1, epsilon = 1e-12);
        assert!(integrate_default(0.332).first_non_finite().is_none());
    }
}
