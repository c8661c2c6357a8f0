use clap::{Parser, ValueEnum};
use lander_simulation::*;

#[derive(Parser)]
#[command(
    name = "lander_sim",
    about = "Fly the classic 1969 lunar module descent from your terminal",
    long_about = "Fly the classic 1969 lunar module descent from your terminal.\n\
        Every 10 seconds mission control lets you reset the fuel rate to 0\n\
        or to any value between 8 and 200 lbs/sec; thrust burns off mass,\n\
        so the same rate brakes harder as the tank empties. Part of the\n\
        game's difficulty comes from slight inaccuracies in the truncated\n\
        formulas for the lowest point of a braking arc; the corrected and\n\
        exact methods are selectable for comparison. Redirected input is\n\
        echoed, so scripted descents stay readable."
)]
struct Cli {
    /// Echo every input line back to standard output (useful with
    /// redirected input)
    #[arg(long)]
    echo: bool,

    /// Formulas for thrust application and the zero-speed search
    #[arg(long, value_enum, default_value = "series")]
    calc: MethodArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// Truncated-series formulas with the historical biased estimate
    Series,
    /// Series formulas with the corrected zero-speed estimate
    Corrected,
    /// Rocket-equation closed forms with iterative root finding
    Exact,
}

impl From<MethodArg> for CalcMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Series => CalcMethod::Series,
            MethodArg::Corrected => CalcMethod::CorrectedSeries,
            MethodArg::Exact => CalcMethod::Exact,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let method = CalcMethod::from(cli.calc);
    let mut console = Console::new(cli.echo);

    let label = match cli.calc {
        MethodArg::Series => "series",
        MethodArg::Corrected => "corrected",
        MethodArg::Exact => "exact",
    };
    println!("Using the {} formulas for the time to lowest point (zero speed)", label);

    println!("CONTROL CALLING LUNAR MODULE. MANUAL CONTROL IS NECESSARY");
    println!("YOU MAY RESET FUEL RATE FR EACH 10 SECS TO 0 OR ANY VALUE");
    println!("BETWEEN 8 & 200 LBS/SEC. YOU'VE 16000 LBS FUEL. ESTIMATED");
    println!("FREE FALL IMPACT TIME-120 SECS. CAPSULE WEIGHT-32500 LBS\n\n");

    loop {
        println!("FIRST RADAR CHECK COMING UP\n\n");
        println!("COMMENCE LANDING PROCEDURE");
        println!("TIME,SECS   ALTITUDE,MILES+FEET   VELOCITY,MPH   FUEL,LBS   FUEL RATE");

        let mut descent = Descent::new(method);
        let outcome = loop {
            print!(
                "{}",
                report::turn_status_row(
                    descent.state.elapsed,
                    descent.state.altitude,
                    descent.state.velocity,
                    descent.remaining_fuel()
                )
            );
            let rate = console.prompt_fuel_rate()?;
            let turn = descent.play_turn(rate);

            for event in &turn.events {
                if let TurnEvent::Status {
                    time,
                    altitude,
                    velocity,
                    fuel,
                    fuel_rate,
                } = event
                {
                    println!(
                        "{}",
                        report::burn_status_row(*time, *altitude, *velocity, *fuel, *fuel_rate)
                    );
                }
            }

            match turn.outcome {
                TurnOutcome::Continue => {}
                other => break other,
            }
        };

        if let TurnOutcome::FuelOut { burnout_time } = outcome {
            println!("\nFUEL OUT AT {:8.2} SECS", burnout_time);
        }

        let impact_mph = report::miles_per_hour(descent.state.velocity);
        println!("\nON THE MOON AT   {:8.3} SECS", descent.state.elapsed);
        println!("IMPACT VELOCITY: {:8.3} M.P.H.", impact_mph);
        println!("FUEL LEFT:       {:8.2} LBS", descent.remaining_fuel());

        let grade = LandingGrade::classify(impact_mph);
        println!("{}", grade.message());
        if grade == LandingGrade::NoSurvivors {
            println!(
                "IN FACT YOU BLASTED A NEW LUNAR CRATER {:8.2} FT. DEEP",
                report::crater_depth_ft(impact_mph)
            );
        }

        if console.is_interactive() {
            println!("\nTRY AGAIN?");
        } else {
            println!();
        }
        if !console.confirm_retry()? {
            break;
        }
    }

    println!("CONTROL OUT");
    Ok(())
}
