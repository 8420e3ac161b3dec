//! Integral and wall quantities of a Blasius profile.
//!
//! With η = y·sqrt(U/(ν·x)) and u/U = f'(η):
//! - skin friction: Cf·sqrt(Re_x) = 2·f''(0)
//! - displacement thickness: δ*·sqrt(U/(ν·x)) = lim (η - f)
//! - momentum thickness: θ·sqrt(U/(ν·x)) = ∫ f'(1 - f') dη
use crate::numerical::ShootingBVP::Blasius_RK4::BlasiusTrajectory;

/// level of u/U that defines the boundary-layer thickness
pub const EDGE_VELOCITY_RATIO: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryLayerProperties {
    /// f''(0)
    pub wall_shear: f64,
    pub displacement_thickness: f64,
    pub momentum_thickness: f64,
    /// δ*/θ
    pub shape_factor: f64,
    /// η where f' first reaches 0.99, None if the domain is too short
    pub eta_99: Option<f64>,
}

impl BoundaryLayerProperties {
    pub fn from_trajectory(trajectory: &BlasiusTrajectory) -> Self {
        let last = trajectory.len() - 1;
        let wall_shear = trajectory.fpp[0];
        let displacement_thickness = trajectory.eta[last] - trajectory.f[last];
        let integrand: Vec<f64> = trajectory.fp.iter().map(|&u| u * (1.0 - u)).collect();
        let momentum_thickness = trapezoid(trajectory.eta.as_slice(), &integrand);
        Self {
            wall_shear,
            displacement_thickness,
            momentum_thickness,
            shape_factor: displacement_thickness / momentum_thickness,
            eta_99: crossing(
                trajectory.eta.as_slice(),
                trajectory.fp.as_slice(),
                EDGE_VELOCITY_RATIO,
            ),
        }
    }

    /// Cf·sqrt(Re_x)
    pub fn skin_friction_coefficient(&self) -> f64 {
        2.0 * self.wall_shear
    }
}

/// trapezoid rule on a (possibly non-uniform) grid
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum()
}

/// First x where y reaches `level`, linearly interpolated between grid points
pub fn crossing(x: &[f64], y: &[f64], level: f64) -> Option<f64> {
    if y.first().is_some_and(|&y0| y0 >= level) {
        return x.first().copied();
    }
    (1..y.len()).find(|&i| y[i] >= level).map(|i| {
        let t = (level - y[i - 1]) / (y[i] - y[i - 1]);
        x[i - 1] + t * (x[i] - x[i - 1])
    })
}
