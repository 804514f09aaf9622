// Newton's method for rational functions that are described by their roots
// and poles, rather than by polynomial coefficients.

#[cfg(test)]
use nalgebra::Matrix2;
use num::complex::Complex64;

/// Newton iteration stops once a single step moves less than this distance.
pub const CRITICAL_DISTANCE: f64 = 1e-7;

/// Default iteration budget for each pixel.
pub const MAX_ITERATIONS: u32 = 30;

/**
 * The rational function f(z) = Π(z - root_i) / Π(z - pole_j).
 *
 * Newton's method only ever needs the ratio f'(z) / f(z), which for this
 * product form is the logarithmic derivative:
 *     f'(z) / f(z) = Σ 1/(z - root_i) - Σ 1/(z - pole_j)
 * so neither polynomial is evaluated directly.
 */
#[derive(Debug, Clone, Copy)]
pub struct RationalFunction<'a> {
    pub roots: &'a [Complex64],
    pub poles: &'a [Complex64],
}

/// Outcome of evaluating the Newton step at a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NewtonStep {
    /// `z` coincides exactly with one of the roots.
    AtRoot,
    /// `z` coincides with a pole, or the reciprocal sum is exactly zero.
    Singular,
    /// The step is defined but does not fit in a finite `Complex64`.
    Overflow,
    /// The next point of the sequence.
    Next(Complex64),
}

impl<'a> RationalFunction<'a> {
    pub fn new(roots: &'a [Complex64], poles: &'a [Complex64]) -> Self {
        Self { roots, poles }
    }

    /// f(z), only used to cross-check the logarithmic derivative.
    #[cfg(test)]
    pub fn value(&self, z: Complex64) -> Complex64 {
        let numerator: Complex64 = self.roots.iter().map(|r| z - r).product();
        let denominator: Complex64 = self.poles.iter().map(|p| z - p).product();
        numerator / denominator
    }

    /// f'(z) / f(z). Returns `None` when `z` sits exactly on a root or pole.
    pub fn log_derivative(&self, z: Complex64) -> Option<Complex64> {
        let mut sum = Complex64::new(0.0, 0.0);
        for root in self.roots {
            let delta = z - root;
            if delta.norm_sqr() == 0.0 {
                return None;
            }
            sum += delta.inv();
        }
        for pole in self.poles {
            let delta = z - pole;
            if delta.norm_sqr() == 0.0 {
                return None;
            }
            sum -= delta.inv();
        }
        Some(sum)
    }

    /// z' = z - f(z) / f'(z) = z - 1 / (f'(z) / f(z))
    pub fn newton_step(&self, z: Complex64) -> NewtonStep {
        if self.roots.contains(&z) {
            return NewtonStep::AtRoot;
        }
        match self.log_derivative(z) {
            Some(sum) if sum != Complex64::new(0.0, 0.0) => {
                let next = z - sum.inv();
                if next.is_finite() {
                    NewtonStep::Next(next)
                } else {
                    NewtonStep::Overflow
                }
            }
            _ => NewtonStep::Singular,
        }
    }
}

/// Why the iteration sequence for a single point stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A step was shorter than the critical distance (or landed exactly on a root).
    Converged,
    /// The full iteration budget was used without converging.
    Exhausted,
    /// The step was undefined; the start point is reported with zero iterations.
    Singular,
}

/// Terminal value of a Newton sequence, along with the iterations it consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationResult {
    pub terminal: Complex64,
    pub iterations_used: u32,
    pub termination: Termination,
}

/**
 * Runs up to `max_iterations` Newton steps from `start` on the rational
 * function defined by `roots` and `poles`.
 *
 * - Converged: the step `|z' - z|` dropped below `critical_distance`. The
 *   terminal value is `z'` and `iterations_used` counts the steps taken
 *   before the converging one, so it is always below `max_iterations`.
 * - Exhausted: the final `z` is returned with `iterations_used == max_iterations`.
 *   A step that overflows also ends the sequence this way, reporting the last
 *   finite `z` it reached.
 * - Singular: `z` hit a pole exactly, or the reciprocal sum vanished. The
 *   original `start` is returned with zero iterations, and it is up to the
 *   classifier to decide whether that point matches any root.
 *
 * Non-finite starting points are reported as singular without stepping.
 */
pub fn iterate(
    max_iterations: u32,
    start: Complex64,
    roots: &[Complex64],
    poles: &[Complex64],
    critical_distance: f64,
) -> IterationResult {
    debug_assert!(!roots.is_empty(), "the root set must not be empty");
    let singular = IterationResult {
        terminal: start,
        iterations_used: 0,
        termination: Termination::Singular,
    };
    if !start.is_finite() {
        return singular;
    }

    let function = RationalFunction::new(roots, poles);
    let critical_distance_sqr = critical_distance * critical_distance;
    let mut z = start;
    for iteration in 0..max_iterations {
        match function.newton_step(z) {
            NewtonStep::AtRoot => {
                return IterationResult {
                    terminal: z,
                    iterations_used: iteration,
                    termination: Termination::Converged,
                }
            }
            NewtonStep::Singular => return singular,
            NewtonStep::Overflow => break,
            NewtonStep::Next(next) => {
                if (next - z).norm_sqr() < critical_distance_sqr {
                    return IterationResult {
                        terminal: next,
                        iterations_used: iteration,
                        termination: Termination::Converged,
                    };
                }
                z = next;
            }
        }
    }
    IterationResult {
        terminal: z,
        iterations_used: max_iterations,
        termination: Termination::Exhausted,
    }
}

/// Real (left-regular) representation of a complex scalar as a 2×2 real matrix.
///
/// Maps s = a + i b to the real-linear map x ↦ s·x on C ≅ R^2:
///     [ a  -b ]
///     [ b   a ]
#[inline]
#[cfg(test)]
fn left_multiply_matrix(s: Complex64) -> Matrix2<f64> {
    Matrix2::new(s.re, -s.im, s.im, s.re)
}

/// Checks f'(z) = f(z) * (f'(z) / f(z)) against central finite differences of f.
#[cfg(test)]
fn assert_consistent_value_and_log_derivative(
    function: &RationalFunction,
    z0: Complex64,
    abs_tol: f64,
    rel_tol: f64,
) {
    // Scaled step size for the finite difference operation
    let scale = (z0.norm() + 1.0).sqrt();
    let h = 1e-7 / scale;

    // central finite differences in x and y
    let dfdx = {
        let f_xp = function.value(z0 + Complex64::new(h, 0.0));
        let f_xm = function.value(z0 - Complex64::new(h, 0.0));
        (f_xp - f_xm) * (0.5 / h)
    };
    let dfdy = {
        let f_yp = function.value(z0 + Complex64::new(0.0, h));
        let f_ym = function.value(z0 - Complex64::new(0.0, h));
        (f_yp - f_ym) * (0.5 / h)
    };

    // J_num = [[∂u/∂x, ∂u/∂y],
    //          [∂v/∂x, ∂v/∂y]]
    let finite_difference_slope = Matrix2::new(dfdx.re, dfdy.re, dfdx.im, dfdy.im);

    // J_ana = φ(f(z0) * f'(z0)/f(z0))
    let slope = function.value(z0) * function.log_derivative(z0).unwrap();
    let analytic_slope = left_multiply_matrix(slope);

    // nalgebra's `.norm()` on matrices is the Frobenius norm (Euclidean of all entries)
    let error_norm = (finite_difference_slope - analytic_slope).norm();
    let reference_scale = analytic_slope.norm().max(1.0);

    assert!(
        error_norm <= abs_tol + rel_tol * reference_scale,
        "Derivative check failed at z0={z0:?}\n\
         numerical J = {finite_difference_slope}\n\
         analytic  J = {analytic_slope}\n\
         err_frob   = {error_norm:e},  bound = {}",
        abs_tol + rel_tol * reference_scale
    );
}
