use crate::constants::{
    FUEL_EPSILON, LANDING_ALTITUDE_TOLERANCE, MIN_SURFACE_STEP, TIME_EPSILON, TURN_DURATION,
};
use crate::trajectory_system::events::{
    free_fall_impact_time, net_acceleration, reversal_time, surface_crossing_time,
};
use crate::trajectory_system::propagator::{
    propagate, BurnResult, CalcMethod, DescentParams, LanderState,
};

/// Where the controller is within the descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescentPhase {
    /// Between turns, waiting for the next fuel-rate command.
    AwaitingCommand,
    /// Burning through the sub-steps of the current turn.
    Thrusting,
    /// The burn reversed the motion; locating the lowest point.
    ReversalSearch,
    /// The burn passed the surface; converging onto the crossing.
    SurfaceSearch,
    /// Tank dry, coasting down.
    FuelOut,
    Landed,
}

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnOutcome {
    /// Turn clock spent; prompt for the next fuel rate.
    Continue,
    /// Fuel ran out mid-turn at `burnout_time`; the lander coasted down.
    FuelOut { burnout_time: f64 },
    Landed,
}

/// Observable moments within a turn, in order of occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnEvent {
    /// State at the start of a follow-up sub-burn within the same turn.
    Status {
        time: f64,
        altitude: f64,
        velocity: f64,
        fuel: f64,
        fuel_rate: f64,
    },
    /// One candidate duration of the surface search.
    SurfaceStep { duration: f64 },
}

/// Everything a turn produced, for display and inspection.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub events: Vec<TurnEvent>,
    pub outcome: TurnOutcome,
}

/// One descent attempt: the lander state plus the controller that drives
/// the propagator and event solver, one fuel-rate command per turn.
pub struct Descent {
    pub state: LanderState,
    pub params: DescentParams,
    pub method: CalcMethod,
    pub phase: DescentPhase,
}

impl Descent {
    pub fn new(method: CalcMethod) -> Self {
        Descent::with_state(LanderState::start_of_descent(), DescentParams::lunar(), method)
    }

    pub fn with_state(state: LanderState, params: DescentParams, method: CalcMethod) -> Self {
        Descent {
            state,
            params,
            method,
            phase: DescentPhase::AwaitingCommand,
        }
    }

    pub fn remaining_fuel(&self) -> f64 {
        self.state.remaining_fuel(&self.params)
    }

    pub fn is_down(&self) -> bool {
        self.phase == DescentPhase::Landed
    }

    /// Run one 10-second control turn at the given fuel rate.
    ///
    /// The turn advances in sub-burns: each covers the remaining turn
    /// clock, clamped so it cannot burn fuel the tank does not hold. A
    /// sub-burn that reaches the surface hands over to the surface
    /// search; one that reverses the motion hands over to the reversal
    /// search. The rate has already been validated by the input layer.
    pub fn play_turn(&mut self, fuel_rate: f64) -> TurnReport {
        let mut events = Vec::new();
        self.state.time_remaining = TURN_DURATION;
        self.phase = DescentPhase::Thrusting;

        let mut sub_burns = 0u32;
        loop {
            if self.remaining_fuel() < FUEL_EPSILON {
                let burnout_time = self.state.elapsed;
                self.coast_to_surface();
                return TurnReport {
                    events,
                    outcome: TurnOutcome::FuelOut { burnout_time },
                };
            }
            if self.state.time_remaining < TIME_EPSILON {
                self.phase = DescentPhase::AwaitingCommand;
                return TurnReport {
                    events,
                    outcome: TurnOutcome::Continue,
                };
            }
            if sub_burns > 0 {
                events.push(TurnEvent::Status {
                    time: self.state.elapsed,
                    altitude: self.state.altitude,
                    velocity: self.state.velocity,
                    fuel: self.remaining_fuel(),
                    fuel_rate,
                });
            }
            sub_burns += 1;

            let mut dt = self.state.time_remaining;
            if dt * fuel_rate > self.remaining_fuel() {
                dt = self.remaining_fuel() / fuel_rate;
            }

            let burn = propagate(&self.state, &self.params, self.method, fuel_rate, dt);

            if burn.altitude <= 0.0 {
                self.settle_onto_surface(dt, burn, fuel_rate, &mut events);
                return TurnReport {
                    events,
                    outcome: TurnOutcome::Landed,
                };
            }

            if self.state.velocity > 0.0 && burn.velocity < 0.0 {
                if self.search_for_reversal(fuel_rate, &mut events) {
                    return TurnReport {
                        events,
                        outcome: TurnOutcome::Landed,
                    };
                }
                // Turn clock or velocity sign settled; re-enter the loop
                // so the next sub-burn starts from the committed state.
                self.phase = DescentPhase::Thrusting;
                continue;
            }

            self.state.commit(burn, fuel_rate, dt);
        }
    }

    /// Locate the lowest point of a motion-reversing burn. Returns true
    /// when the search ended in a touchdown.
    fn search_for_reversal(&mut self, fuel_rate: f64, events: &mut Vec<TurnEvent>) -> bool {
        self.phase = DescentPhase::ReversalSearch;
        loop {
            let dt = reversal_time(&self.state, &self.params, self.method, fuel_rate);
            let burn = propagate(&self.state, &self.params, self.method, fuel_rate, dt);

            if burn.altitude <= LANDING_ALTITUDE_TOLERANCE {
                if burn.altitude >= 0.0 {
                    // The lowest point sits a rounding hair above the
                    // surface: cut the engine and let the remaining gap
                    // close in free fall, instead of feeding the general
                    // solver a near-zero discriminant.
                    let tail = (2.0 * burn.altitude / self.params.gravity).sqrt();
                    self.state.velocity = tail * self.params.gravity;
                    self.state.altitude = 0.0;
                    self.state.elapsed += tail;
                    self.phase = DescentPhase::Landed;
                    return true;
                }
                // Lowest point is below the surface after all.
                self.settle_onto_surface(dt, burn, fuel_rate, events);
                return true;
            }

            self.state.commit(burn, fuel_rate, dt);
            if self.state.time_remaining < TIME_EPSILON || self.state.velocity <= 0.0 {
                return false;
            }
        }
    }

    /// Converge onto the exact surface crossing of a burn that overshot
    /// it. Entered with the overshooting burn uncommitted; each pass
    /// recomputes the crossing from the committed state, because the
    /// deceleration itself shifts as mass burns off.
    fn settle_onto_surface(
        &mut self,
        mut dt: f64,
        mut burn: BurnResult,
        fuel_rate: f64,
        events: &mut Vec<TurnEvent>,
    ) {
        self.phase = DescentPhase::SurfaceSearch;
        while dt >= MIN_SURFACE_STEP {
            let acc = net_acceleration(&self.state, &self.params, fuel_rate);
            dt = surface_crossing_time(&self.state, &self.params, self.method, fuel_rate);
            events.push(TurnEvent::SurfaceStep { duration: dt });

            if dt > 0.0 {
                burn = propagate(&self.state, &self.params, self.method, fuel_rate, dt);
            } else if dt < 0.0 {
                // Degenerate candidate: the crossing already happened.
                // Pin the altitude to the boundary instead of stepping
                // backward in time.
                burn.velocity += dt * acc;
                burn.altitude = 0.0;
                dt = 0.0;
            }
            self.state.commit(burn, fuel_rate, dt);
        }
        self.phase = DescentPhase::Landed;
    }

    /// Fuel exhausted: free-fall the rest of the way down.
    fn coast_to_surface(&mut self) {
        self.phase = DescentPhase::FuelOut;
        let dt = free_fall_impact_time(&self.state, &self.params);
        self.state.velocity += self.params.gravity * dt;
        self.state.elapsed += dt;
        self.state.altitude = 0.0;
        self.phase = DescentPhase::Landed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INITIAL_MASS;
    use approx::assert_relative_eq;

    #[test]
    fn test_coasting_turn_is_plain_free_fall() {
        let mut descent = Descent::new(CalcMethod::Series);
        let report = descent.play_turn(0.0);

        assert_eq!(report.outcome, TurnOutcome::Continue);
        assert!(report.events.is_empty());
        assert_eq!(descent.phase, DescentPhase::AwaitingCommand);

        assert_relative_eq!(descent.state.elapsed, TURN_DURATION);
        assert_relative_eq!(descent.state.mass, INITIAL_MASS);
        // 120 - 1·10 - 0.5·0.001·100
        assert_relative_eq!(descent.state.altitude, 109.95, max_relative = 1e-12);
        assert_relative_eq!(descent.state.velocity, 1.01, max_relative = 1e-12);
    }

    #[test]
    fn test_burning_turn_consumes_fuel() {
        let mut descent = Descent::new(CalcMethod::Series);
        let report = descent.play_turn(100.0);

        assert_eq!(report.outcome, TurnOutcome::Continue);
        assert_relative_eq!(descent.remaining_fuel(), 15_000.0, max_relative = 1e-12);
        assert!(descent.state.velocity < 1.01, "thrust should slow the descent");
    }

    #[test]
    fn test_methods_agree_on_a_coasting_turn() {
        for method in [CalcMethod::Series, CalcMethod::CorrectedSeries, CalcMethod::Exact] {
            let mut descent = Descent::new(method);
            descent.play_turn(0.0);
            assert_relative_eq!(descent.state.altitude, 109.95, max_relative = 1e-12);
        }
    }
}
