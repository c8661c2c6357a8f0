//! Console presentation of the descent: status rows in the classic
//! miles+feet / mph / lbs columns, and the landing verdict.

use crate::constants::{CRATER_FEET_PER_MPH, FEET_PER_MILE, SECONDS_PER_HOUR};

pub fn whole_miles(altitude: f64) -> f64 {
    altitude.trunc()
}

/// Sub-mile remainder in feet, signed so a marginal fly-off or overshoot
/// stays visible after the miles column rounds to zero.
pub fn feet_remainder(altitude: f64) -> f64 {
    FEET_PER_MILE * (altitude - altitude.trunc())
}

pub fn miles_per_hour(velocity: f64) -> f64 {
    SECONDS_PER_HOUR * velocity
}

/// Row printed at the start of a turn, ahead of the fuel-rate prompt.
pub fn turn_status_row(time: f64, altitude: f64, velocity: f64, fuel: f64) -> String {
    format!(
        "{:7.0}{:16.0}{:7.0}{:15.2}{:12.1}      ",
        time,
        whole_miles(altitude),
        feet_remainder(altitude),
        miles_per_hour(velocity),
        fuel
    )
}

/// Row printed for follow-up sub-burns within a turn, with signed feet
/// and the active fuel rate.
pub fn burn_status_row(time: f64, altitude: f64, velocity: f64, fuel: f64, fuel_rate: f64) -> String {
    format!(
        "{:11.3}{:12.0}{:+7.0}{:15.2}{:12.1}      FR  {:.0}",
        time,
        whole_miles(altitude),
        feet_remainder(altitude),
        miles_per_hour(velocity),
        fuel,
        fuel_rate
    )
}

/// Verdict on the touchdown, from the impact speed in mph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingGrade {
    Perfect,
    Good,
    Poor,
    CraftDamage,
    Crash,
    NoSurvivors,
}

impl LandingGrade {
    pub fn classify(impact_mph: f64) -> Self {
        if impact_mph <= 1.0 {
            LandingGrade::Perfect
        } else if impact_mph <= 10.0 {
            LandingGrade::Good
        } else if impact_mph <= 22.0 {
            LandingGrade::Poor
        } else if impact_mph <= 40.0 {
            LandingGrade::CraftDamage
        } else if impact_mph <= 60.0 {
            LandingGrade::Crash
        } else {
            LandingGrade::NoSurvivors
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            LandingGrade::Perfect => "PERFECT LANDING !-(LUCKY)",
            LandingGrade::Good => "GOOD LANDING-(COULD BE BETTER)",
            LandingGrade::Poor => "CONGRATULATIONS ON A POOR LANDING",
            LandingGrade::CraftDamage => "CRAFT DAMAGE. GOOD LUCK",
            LandingGrade::Crash => "CRASH LANDING-YOU'VE 5 HRS OXYGEN",
            LandingGrade::NoSurvivors => "SORRY,BUT THERE WERE NO SURVIVORS-YOU BLEW IT!",
        }
    }
}

/// Depth of the crater left by an unsurvivable impact.
pub fn crater_depth_ft(impact_mph: f64) -> f64 {
    impact_mph * CRATER_FEET_PER_MPH
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_classification_buckets() {
        assert_eq!(LandingGrade::classify(0.9), LandingGrade::Perfect);
        assert_eq!(LandingGrade::classify(9.9), LandingGrade::Good);
        assert_eq!(LandingGrade::classify(21.9), LandingGrade::Poor);
        assert_eq!(LandingGrade::classify(39.9), LandingGrade::CraftDamage);
        assert_eq!(LandingGrade::classify(59.9), LandingGrade::Crash);
        assert_eq!(LandingGrade::classify(61.0), LandingGrade::NoSurvivors);
    }

    #[test]
    fn test_bucket_boundaries_are_inclusive() {
        assert_eq!(LandingGrade::classify(1.0), LandingGrade::Perfect);
        assert_eq!(LandingGrade::classify(10.0), LandingGrade::Good);
        assert_eq!(LandingGrade::classify(22.0), LandingGrade::Poor);
        assert_eq!(LandingGrade::classify(40.0), LandingGrade::CraftDamage);
        assert_eq!(LandingGrade::classify(60.0), LandingGrade::Crash);
    }

    #[test]
    fn test_miles_and_feet_split() {
        assert_abs_diff_eq!(whole_miles(119.5), 119.0);
        assert_abs_diff_eq!(feet_remainder(119.5), 2_640.0);

        // A marginal fly-off shows as negative feet, not as zero.
        assert_abs_diff_eq!(whole_miles(-0.001), -0.0);
        assert_abs_diff_eq!(feet_remainder(-0.001), -5.28, epsilon = 1e-9);
    }

    #[test]
    fn test_velocity_conversion() {
        assert_relative_eq!(miles_per_hour(1.0), 3_600.0);
        assert_relative_eq!(miles_per_hour(0.001), 3.6);
    }

    #[test]
    fn test_crater_depth() {
        assert_relative_eq!(crater_depth_ft(100.0), 27.7777, max_relative = 1e-9);
    }

    #[test]
    fn test_row_layout_stays_aligned() {
        let row = turn_status_row(0.0, 120.0, 1.0, 16_000.0);
        assert!(row.starts_with("      0"));
        assert!(row.contains("3600.00"));
        assert!(row.contains("16000.0"));

        let row = burn_status_row(62.5, 10.25, 0.5, 8_000.0, 100.0);
        assert!(row.contains("62.500"));
        assert!(row.contains("+1320"));
        assert!(row.ends_with("FR  100"));
    }
}
