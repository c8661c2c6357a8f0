//! Brent's method for scalar root finding.
//!
//! Combines bisection, the secant method and inverse quadratic
//! interpolation. The interval is not required to be a verified
//! sign-change bracket: callers may pass endpoints derived from
//! approximate formulas, and the search then contracts toward the
//! endpoint with the smaller residual and returns its best estimate
//! instead of failing.

/// Evaluation ceiling for pathological inputs (near-flat functions).
/// Well-conditioned brackets converge in well under 100 evaluations.
const MAX_EVALUATIONS: usize = 200;

/// What the continuation-style search wants next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStep {
    /// Evaluate the function here and pass the result to [`RootSearch::submit`].
    Evaluate(f64),
    /// Converged; the argument is the root estimate.
    Converged(f64),
}

/// Continuation form of the solver: the caller evaluates the function one
/// point at a time, so evaluation can be interleaved with other logic
/// instead of handing over a callable.
///
/// All iteration state lives in this value. Interleaving two solves
/// requires two instances; feeding a value that was not requested by the
/// most recent [`SearchStep::Evaluate`] leaves the search meaningless.
#[derive(Debug, Clone)]
pub struct RootSearch {
    tolerance: f64,
    sa: f64,
    sb: f64,
    fa: f64,
    fb: f64,
    c: f64,
    fc: f64,
    d: f64,
    e: f64,
    phase: Phase,
    evaluations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    AwaitLower,
    AwaitUpper,
    Bracketing,
}

impl RootSearch {
    pub fn new(lo: f64, hi: f64, tolerance: f64) -> Self {
        RootSearch {
            tolerance,
            sa: lo,
            sb: hi,
            fa: 0.0,
            fb: 0.0,
            c: lo,
            fc: 0.0,
            d: hi - lo,
            e: hi - lo,
            phase: Phase::AwaitLower,
            evaluations: 0,
        }
    }

    /// The point whose function value the search needs next.
    pub fn next_point(&self) -> f64 {
        match self.phase {
            Phase::AwaitLower => self.sa,
            Phase::AwaitUpper | Phase::Bracketing => self.sb,
        }
    }

    /// Feed the function value at the most recently requested point.
    pub fn submit(&mut self, value: f64) -> SearchStep {
        match self.phase {
            Phase::AwaitLower => {
                self.fa = value;
                self.phase = Phase::AwaitUpper;
                SearchStep::Evaluate(self.sb)
            }
            Phase::AwaitUpper => {
                self.fb = value;
                self.c = self.sa;
                self.fc = self.fa;
                self.e = self.sb - self.sa;
                self.d = self.e;
                self.phase = Phase::Bracketing;
                self.advance()
            }
            Phase::Bracketing => {
                self.fb = value;
                // When the trial lands on the same side as c, the old sa
                // becomes the opposing endpoint again.
                if (self.fb > 0.0 && self.fc > 0.0) || (self.fb <= 0.0 && self.fc <= 0.0) {
                    self.c = self.sa;
                    self.fc = self.fa;
                    self.e = self.sb - self.sa;
                    self.d = self.e;
                }
                self.advance()
            }
        }
    }

    /// One Brent iteration: pick the next trial point or declare convergence.
    fn advance(&mut self) -> SearchStep {
        // Keep sb the endpoint with the smaller residual.
        if self.fc.abs() < self.fb.abs() {
            self.sa = self.sb;
            self.sb = self.c;
            self.c = self.sa;
            self.fa = self.fb;
            self.fb = self.fc;
            self.fc = self.fa;
        }

        let tol = 2.0 * f64::EPSILON * self.sb.abs() + self.tolerance;
        let m = 0.5 * (self.c - self.sb);

        if m.abs() <= tol || self.fb == 0.0 || self.evaluations >= MAX_EVALUATIONS {
            return SearchStep::Converged(self.sb);
        }

        if self.e.abs() < tol || self.fa.abs() <= self.fb.abs() {
            // No progress from interpolation expected: bisect.
            self.e = m;
            self.d = m;
        } else {
            let mut s = self.fb / self.fa;
            let mut p;
            let mut q;
            if self.sa == self.c {
                // Only two distinct points: secant step.
                p = 2.0 * m * s;
                q = 1.0 - s;
            } else {
                // Inverse quadratic interpolation through (sa, sb, c).
                q = self.fa / self.fc;
                let r = self.fb / self.fc;
                p = s * (2.0 * m * q * (q - r) - (self.sb - self.sa) * (r - 1.0));
                q = (q - 1.0) * (r - 1.0) * (s - 1.0);
            }

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            s = self.e;
            self.e = self.d;

            if 2.0 * p < 3.0 * m * q - (tol * q).abs() && p < (0.5 * s * q).abs() {
                self.d = p / q;
            } else {
                // Interpolated step unacceptable: bisect.
                self.e = m;
                self.d = m;
            }
        }

        self.sa = self.sb;
        self.fa = self.fb;

        if tol < self.d.abs() {
            self.sb += self.d;
        } else if m > 0.0 {
            self.sb += tol;
        } else {
            self.sb -= tol;
        }

        self.evaluations += 1;
        SearchStep::Evaluate(self.sb)
    }
}

/// Direct form: find `x` in `[lo, hi]` where `f` changes sign, within
/// `tolerance`. Always returns an estimate, even for a non-bracketing
/// interval or a function that refuses to converge.
pub fn find_root<F>(lo: f64, hi: f64, tolerance: f64, mut f: F) -> f64
where
    F: FnMut(f64) -> f64,
{
    let mut search = RootSearch::new(lo, hi, tolerance);
    let mut step = search.submit(f(search.next_point()));
    loop {
        match step {
            SearchStep::Converged(root) => return root,
            SearchStep::Evaluate(x) => step = search.submit(f(x)),
        }
    }
}
