// Descent Starting Conditions
pub const INITIAL_ALTITUDE: f64 = 120.0; // miles
pub const INITIAL_VELOCITY: f64 = 1.0; // miles/s, positive = descending
pub const INITIAL_MASS: f64 = 32_500.0; // lbs, capsule plus fuel
pub const EMPTY_MASS: f64 = 16_500.0; // lbs, structure without fuel

// Environment / Propulsion Constants
pub const LUNAR_GRAVITY: f64 = 0.001; // miles/s²
pub const SPECIFIC_THRUST: f64 = 1.8; // thrust per lb of fuel burned per second

// Control Interval
pub const TURN_DURATION: f64 = 10.0; // s, one fuel-rate command per turn
pub const MIN_FUEL_RATE: f64 = 8.0; // lbs/s, engine cannot throttle below this (except off)
pub const MAX_FUEL_RATE: f64 = 200.0; // lbs/s

// Numeric Thresholds
pub const FUEL_EPSILON: f64 = 0.001; // lbs, below this the tank counts as dry
pub const TIME_EPSILON: f64 = 0.001; // s, below this the turn clock counts as spent
pub const MIN_SURFACE_STEP: f64 = 0.005; // s, surface search stops under this step
pub const LANDING_ALTITUDE_TOLERANCE: f64 = 0.00003858; // miles, sub-foot after display rounding
pub const REVERSAL_TIME_BIAS: f64 = 0.05; // s, empirical correction on the series estimate
pub const REVERSAL_ROOT_TOLERANCE: f64 = 1e-9; // miles

// Display Conversions
pub const FEET_PER_MILE: f64 = 5_280.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const CRATER_FEET_PER_MPH: f64 = 0.277_777; // ft of crater depth per mph of impact
