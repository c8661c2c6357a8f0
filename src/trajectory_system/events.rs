//! Event timing during a burn: when does the velocity reverse, when does
//! the altitude cross the surface.
//!
//! Each question has a closed-form estimate derived from the series
//! velocity formula; the [`CalcMethod`] decides whether the estimate is
//! used as-is, with the corrected coefficient, or replaced by an
//! iterative search on the exact altitude curve. The functions here are
//! pure and return candidate durations; the turn controller commits.

use crate::constants::{REVERSAL_ROOT_TOLERANCE, REVERSAL_TIME_BIAS};
use crate::trajectory_system::propagator::{propagate, CalcMethod, DescentParams, LanderState};
use crate::utils::quadratic::solve_quadratic;
use crate::utils::root_finding::find_root;

/// Net downward acceleration while burning at `fuel_rate`: gravity minus
/// thrust over the current mass. Negative when the engine overpowers
/// gravity.
pub fn net_acceleration(state: &LanderState, params: &DescentParams, fuel_rate: f64) -> f64 {
    params.gravity - params.spec_thrust * fuel_rate / state.mass
}

/// Duration until the descent velocity returns to zero during a burn
/// strong enough to reverse the motion.
///
/// The closed-form estimate inverts the series velocity formula to first
/// order; its `+0.05` s bias is an empirical correction carried by the
/// plain series method only. The corrected variant halves the `V/Z`
/// coefficient under the root and drops the bias. The exact method keeps
/// the estimate only as a search interval and locates where the exact
/// altitude curve meets the surface within it; without a crossing the
/// search settles near the lowest point, which the caller's altitude
/// check then classifies.
pub fn reversal_time(
    state: &LanderState,
    params: &DescentParams,
    method: CalcMethod,
    fuel_rate: f64,
) -> f64 {
    let z = params.spec_thrust;
    let v = state.velocity;
    let thrust = z * fuel_rate;

    let x = 0.5 * (1.0 - state.mass * params.gravity / thrust);
    let estimate =
        state.mass * v / (thrust * (x + (x * x + v / z).sqrt())) + REVERSAL_TIME_BIAS;

    match method {
        CalcMethod::Series => estimate,
        CalcMethod::CorrectedSeries => {
            state.mass * v / (thrust * (x + (x * x + 0.5 * v / z).sqrt()))
        }
        CalcMethod::Exact => find_root(0.0, estimate, REVERSAL_ROOT_TOLERANCE, |t| {
            propagate(state, params, CalcMethod::Exact, fuel_rate, t).altitude
        }),
    }
}

/// Duration until the altitude reaches the surface, for a burn already
/// known to overshoot it.
///
/// Uses the root-selection branch `2A / (disc + V)`, which stays
/// well-conditioned when `disc ≈ V`; the algebraically equal
/// `(disc - V) / acc` loses those digits to cancellation. Under the exact
/// method the robust quadratic solver cross-checks the same condition and
/// supplies the smallest non-negative root when real roots exist.
pub fn surface_crossing_time(
    state: &LanderState,
    params: &DescentParams,
    method: CalcMethod,
    fuel_rate: f64,
) -> f64 {
    let acc = net_acceleration(state, params, fuel_rate);
    let disc = (state.velocity * state.velocity + 2.0 * state.altitude * acc).sqrt();
    let tf = 2.0 * state.altitude / (disc + state.velocity);

    if method == CalcMethod::Exact {
        if let Some((lo, hi)) = solve_quadratic(0.5 * acc, state.velocity, -state.altitude) {
            return if lo < 0.0 { hi } else { lo };
        }
    }
    tf
}

/// Unpowered ground-intersection time, used once the tank runs dry.
pub fn free_fall_impact_time(state: &LanderState, params: &DescentParams) -> f64 {
    let disc =
        (state.velocity * state.velocity + 2.0 * state.altitude * params.gravity).sqrt();
    (disc - state.velocity) / params.gravity
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn braking_state(altitude: f64) -> LanderState {
        LanderState {
            altitude,
            velocity: 0.05,
            mass: 20_000.0,
            elapsed: 100.0,
            time_remaining: 10.0,
        }
    }

    #[test]
    fn test_series_reversal_brings_velocity_near_zero() {
        let state = braking_state(0.2);
        let params = DescentParams::lunar();
        let fuel_rate = 200.0;

        for method in [CalcMethod::Series, CalcMethod::CorrectedSeries] {
            let tf = reversal_time(&state, &params, method, fuel_rate);
            assert!(tf > 0.0);

            let burn = propagate(&state, &params, method, fuel_rate, tf);
            assert!(
                burn.velocity.abs() < 2e-3,
                "velocity {} not near zero after reversal ({:?})",
                burn.velocity,
                method
            );
        }
    }

    #[test]
    fn test_biased_estimate_overshoots_the_reversal() {
        // The +0.05 s bias pushes the series estimate past the instant of
        // zero velocity, so the propagated velocity comes out ascending.
        let state = braking_state(0.2);
        let params = DescentParams::lunar();
        let fuel_rate = 200.0;

        let tf = reversal_time(&state, &params, CalcMethod::Series, fuel_rate);
        let burn = propagate(&state, &params, CalcMethod::Series, fuel_rate, tf);
        assert!(burn.velocity < 0.0);
    }

    #[test]
    fn test_exact_reversal_finds_surface_contact_when_curve_dips_under() {
        // From 0.05 miles the braking arc passes below the surface before
        // the velocity reverses; the search must land on that crossing.
        let state = braking_state(0.05);
        let params = DescentParams::lunar();
        let fuel_rate = 200.0;

        let tf = reversal_time(&state, &params, CalcMethod::Exact, fuel_rate);
        assert!(tf > 0.0);

        let burn = propagate(&state, &params, CalcMethod::Exact, fuel_rate, tf);
        assert_abs_diff_eq!(burn.altitude, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_exact_reversal_without_contact_stays_in_interval() {
        // From 0.2 miles the arc never reaches the surface; the interval
        // is not a sign-change bracket and the search settles inside it.
        let state = braking_state(0.2);
        let params = DescentParams::lunar();
        let fuel_rate = 200.0;

        let estimate = reversal_time(&state, &params, CalcMethod::Series, fuel_rate);
        let tf = reversal_time(&state, &params, CalcMethod::Exact, fuel_rate);

        assert!(tf.is_finite());
        assert!((0.0..=estimate).contains(&tf), "search left [0, {}]: {}", estimate, tf);
    }

    #[test]
    fn test_crossing_formula_agrees_with_quadratic_solver() {
        let state = LanderState {
            altitude: 0.1,
            velocity: 0.05,
            mass: 32_500.0,
            elapsed: 0.0,
            time_remaining: 10.0,
        };
        let params = DescentParams::lunar();
        let fuel_rate = 200.0;

        let direct = surface_crossing_time(&state, &params, CalcMethod::Series, fuel_rate);
        let cross_checked = surface_crossing_time(&state, &params, CalcMethod::Exact, fuel_rate);

        assert!(direct > 0.0);
        assert_relative_eq!(direct, cross_checked, max_relative = 1e-9);
    }

    #[test]
    fn test_crossing_picks_the_earlier_touchdown() {
        // Decelerating overshoot: both quadratic roots are positive, the
        // descent meets the surface at the smaller one.
        let state = LanderState {
            altitude: 0.1,
            velocity: 0.05,
            mass: 32_500.0,
            elapsed: 0.0,
            time_remaining: 10.0,
        };
        let params = DescentParams::lunar();
        let fuel_rate = 200.0;

        let acc = net_acceleration(&state, &params, fuel_rate);
        let (lo, hi) = solve_quadratic(0.5 * acc, state.velocity, -state.altitude).unwrap();
        assert!(lo > 0.0 && hi > lo);

        let tf = surface_crossing_time(&state, &params, CalcMethod::Exact, fuel_rate);
        assert_relative_eq!(tf, lo, max_relative = 1e-12);
    }

    #[test]
    fn test_free_fall_impact_time() {
        let params = DescentParams::lunar();

        // From rest: t = sqrt(2A/G).
        let dropped = LanderState {
            altitude: 0.0005,
            velocity: 0.0,
            mass: 17_000.0,
            elapsed: 0.0,
            time_remaining: 0.0,
        };
        assert_relative_eq!(free_fall_impact_time(&dropped, &params), 1.0, max_relative = 1e-12);

        // The published free-fall figure: 120 miles at 1 mile/s.
        let start = LanderState::start_of_descent();
        assert_relative_eq!(
            free_fall_impact_time(&start, &params),
            ((1.24_f64).sqrt() - 1.0) / 0.001,
            max_relative = 1e-12
        );
    }
}
