//! Descent state propagation under gravity and mass-depleting thrust.
//!
//! The thrust model has a closed-form solution (rocket equation), so the
//! propagator evaluates formulas instead of stepping an ODE: either the
//! exact logarithmic form or its 5th-order series, selected once per run
//! by [`CalcMethod`].

use crate::constants::{
    EMPTY_MASS, INITIAL_ALTITUDE, INITIAL_MASS, INITIAL_VELOCITY, LUNAR_GRAVITY, SPECIFIC_THRUST,
};

/// Which formulas the propagator and the event solver use. Fixed before a
/// descent attempt starts; exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcMethod {
    /// Truncated-series thrust integration and the biased zero-speed
    /// estimate, as the game has always computed them.
    Series,
    /// Same series propagation, zero-speed estimate with the corrected
    /// coefficient and without the empirical bias.
    CorrectedSeries,
    /// Rocket-equation closed forms everywhere, with iterative root
    /// finding for the zero-speed search.
    Exact,
}

/// Constants of one descent attempt.
#[derive(Debug, Clone, Copy)]
pub struct DescentParams {
    pub gravity: f64,     // miles/s²
    pub spec_thrust: f64, // thrust per lb of fuel burned per second
    pub empty_mass: f64,  // lbs
}

impl DescentParams {
    pub fn lunar() -> Self {
        DescentParams {
            gravity: LUNAR_GRAVITY,
            spec_thrust: SPECIFIC_THRUST,
            empty_mass: EMPTY_MASS,
        }
    }
}

/// Physical state of the lander, owned by the turn controller and
/// mutated only by committing a propagation result.
#[derive(Debug, Clone)]
pub struct LanderState {
    pub altitude: f64,       // miles above the surface
    pub velocity: f64,       // miles/s, positive = descending
    pub mass: f64,           // lbs, structure plus remaining fuel
    pub elapsed: f64,        // s since the descent began
    pub time_remaining: f64, // s left in the current control turn
}

impl LanderState {
    pub fn start_of_descent() -> Self {
        LanderState {
            altitude: INITIAL_ALTITUDE,
            velocity: INITIAL_VELOCITY,
            mass: INITIAL_MASS,
            elapsed: 0.0,
            time_remaining: 0.0,
        }
    }

    pub fn remaining_fuel(&self, params: &DescentParams) -> f64 {
        self.mass - params.empty_mass
    }

    /// Commit a burn: advance the clocks, deplete the tank, adopt the
    /// propagated altitude and velocity.
    pub fn commit(&mut self, burn: BurnResult, fuel_rate: f64, dt: f64) {
        self.elapsed += dt;
        self.time_remaining -= dt;
        self.mass -= dt * fuel_rate;
        self.altitude = burn.altitude;
        self.velocity = burn.velocity;
    }
}

/// Altitude and velocity at the end of a candidate burn.
#[derive(Debug, Clone, Copy)]
pub struct BurnResult {
    pub altitude: f64,
    pub velocity: f64,
}

/// Altitude and velocity after burning at `fuel_rate` for `dt` seconds.
///
/// Pure; the caller decides whether to commit the result. `dt` must not
/// consume more fuel than the tank holds — the caller clamps before
/// calling, this only checks the logarithm's domain in debug builds.
pub fn propagate(
    state: &LanderState,
    params: &DescentParams,
    method: CalcMethod,
    fuel_rate: f64,
    dt: f64,
) -> BurnResult {
    let q = dt * fuel_rate / state.mass;
    debug_assert!(
        q < 1.0,
        "burn fraction {} would empty the tank mid-step (dt={} rate={})",
        q,
        dt,
        fuel_rate
    );

    let free_fall_altitude = state.altitude - 0.5 * params.gravity * dt * dt - state.velocity * dt;

    match method {
        CalcMethod::Exact => {
            let velocity = state.velocity + params.gravity * dt + params.spec_thrust * (1.0 - q).ln();
            let mut altitude = free_fall_altitude;
            if q > 0.0 {
                // Primitive of the logarithmic thrust term over [0, dt].
                let burn_span = state.mass / fuel_rate;
                altitude -= params.spec_thrust * ((dt - burn_span) * (1.0 - q).ln() - dt);
            }
            BurnResult { altitude, velocity }
        }
        CalcMethod::Series | CalcMethod::CorrectedSeries => {
            let q2 = q * q;
            let q3 = q2 * q;
            let q4 = q3 * q;
            let q5 = q4 * q;
            let velocity = state.velocity + params.gravity * dt
                - params.spec_thrust * (q + q2 / 2.0 + q3 / 3.0 + q4 / 4.0 + q5 / 5.0);
            let altitude = free_fall_altitude
                + params.spec_thrust
                    * dt
                    * (q / 2.0 + q2 / 6.0 + q3 / 12.0 + q4 / 20.0 + q5 / 30.0);
            BurnResult { altitude, velocity }
        }
    }
}
