pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::descent::{Descent, DescentPhase, TurnEvent, TurnOutcome, TurnReport};
pub use control::input::{valid_fuel_rate, Console};
pub use errors::SimulationError;
pub use trajectory_system::propagator::{propagate, BurnResult, CalcMethod, DescentParams, LanderState};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::events;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::report;
pub use telemetry_system::report::LandingGrade;

// Re-export commonly used numeric utilities
pub use utils::quadratic::solve_quadratic;
pub use utils::root_finding::{find_root, RootSearch, SearchStep};
