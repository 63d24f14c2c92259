/// Bracketing root finder (Brent's method)
///
/// Combines bisection, secant and inverse quadratic interpolation steps and
/// keeps the root bracketed at every iteration. Nothing is randomized: the
/// same function and bracket always yield the same sequence of evaluations.

use crate::error::{EscapeError, EscapeResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentSolver {
    /// Absolute tolerance on the root location
    pub absolute_tolerance: f64,
    /// Relative tolerance on the root location
    pub relative_tolerance: f64,
    pub max_iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    pub root: f64,
    /// Function value at `root`
    pub residual: f64,
    pub iterations: usize,
    pub evaluations: usize,
}

impl Default for BrentSolver {
    fn default() -> Self {
        Self {
            absolute_tolerance: 2e-12,
            relative_tolerance: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}

impl BrentSolver {
    pub fn new(absolute_tolerance: f64, relative_tolerance: f64, max_iterations: usize) -> Self {
        Self {
            absolute_tolerance,
            relative_tolerance,
            max_iterations,
        }
    }

    /// Finds a root of `f` inside `[low, high]`.
    ///
    /// `f(low)` and `f(high)` must differ in sign (or one of them be zero),
    /// otherwise `NoSignChange`. Errors raised by `f` propagate unchanged.
    pub fn find_root<F>(&self, mut f: F, low: f64, high: f64) -> EscapeResult<RootSolution>
    where
        F: FnMut(f64) -> EscapeResult<f64>,
    {
        let mut x_pre = low;
        let mut x_cur = high;
        let mut f_pre = f(x_pre)?;
        let mut f_cur = f(x_cur)?;
        let mut evaluations = 2;

        if f_pre == 0.0 {
            return Ok(RootSolution { root: x_pre, residual: 0.0, iterations: 0, evaluations });
        }
        if f_cur == 0.0 {
            return Ok(RootSolution { root: x_cur, residual: 0.0, iterations: 0, evaluations });
        }
        if !f_pre.is_finite() || !f_cur.is_finite() || f_pre.signum() == f_cur.signum() {
            return Err(EscapeError::NoSignChange {
                low,
                high,
                f_low: f_pre,
                f_high: f_cur,
            });
        }

        // x_blk is the contrapoint: f(x_blk) and f(x_cur) have opposite signs
        let mut x_blk = 0.0;
        let mut f_blk = 0.0;
        let mut s_pre = 0.0;
        let mut s_cur = 0.0;

        for iteration in 1..=self.max_iterations {
            if f_pre != 0.0 && f_cur != 0.0 && f_pre.signum() != f_cur.signum() {
                x_blk = x_pre;
                f_blk = f_pre;
                s_pre = x_cur - x_pre;
                s_cur = s_pre;
            }
            if f_blk.abs() < f_cur.abs() {
                x_pre = x_cur;
                x_cur = x_blk;
                x_blk = x_pre;
                f_pre = f_cur;
                f_cur = f_blk;
                f_blk = f_pre;
            }

            let delta = (self.absolute_tolerance + self.relative_tolerance * x_cur.abs()) / 2.0;
            let s_bis = (x_blk - x_cur) / 2.0;
            if f_cur == 0.0 || s_bis.abs() < delta {
                return Ok(RootSolution {
                    root: x_cur,
                    residual: f_cur,
                    iterations: iteration,
                    evaluations,
                });
            }

            if s_pre.abs() > delta && f_cur.abs() < f_pre.abs() {
                let s_try = if x_pre == x_blk {
                    // secant
                    -f_cur * (x_cur - x_pre) / (f_cur - f_pre)
                } else {
                    // inverse quadratic
                    let d_pre = (f_pre - f_cur) / (x_pre - x_cur);
                    let d_blk = (f_blk - f_cur) / (x_blk - x_cur);
                    -f_cur * (f_blk * d_blk - f_pre * d_pre) / (d_blk * d_pre * (f_blk - f_pre))
                };
                if 2.0 * s_try.abs() < s_pre.abs().min(3.0 * s_bis.abs() - delta) {
                    s_pre = s_cur;
                    s_cur = s_try;
                } else {
                    s_pre = s_bis;
                    s_cur = s_bis;
                }
            } else {
                s_pre = s_bis;
                s_cur = s_bis;
            }

            x_pre = x_cur;
            f_pre = f_cur;
            if s_cur.abs() > delta {
                x_cur += s_cur;
            } else {
                x_cur += if s_bis > 0.0 { delta } else { -delta };
            }
            f_cur = f(x_cur)?;
            evaluations += 1;
        }

        Err(EscapeError::ConvergenceFailure {
            iterations: self.max_iterations,
            last_estimate: x_cur,
        })
    }
}
