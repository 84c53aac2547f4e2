//! Staircase CLI
//!
//! Usage:
//!   staircase                                  # Run the reference sequence
//!   staircase --answers "TTFTTF..."            # Run a given sequence
//!   staircase --interactive                    # Enter answers one per line
//!   staircase --answers "..." --json           # JSON output
//!   staircase --config run.json                # Settings from a JSON file

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use staircase::core::{
    capture_record, parse_answer_line, parse_answers, save_record, StaircaseProcedure,
    REFERENCE_SEQUENCE,
};
use staircase::logging::init_logging;
use staircase::types::{Phase, Result, StaircaseConfig, StepOutput, StepRule};
use staircase::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "staircase",
    version = VERSION,
    about = "Adaptive 2-down/1-up staircase - estimate a threshold from yes/no answers",
    long_about = "Runs a 2-down/1-up staircase procedure.\n\n\
                  Two correct answers in a row step the parameter down, any incorrect\n\
                  answer steps it up. Each change of direction is a turnaround; the run\n\
                  ends at the target turnaround count and the threshold estimate is the\n\
                  mean of the turnaround values.\n\n\
                  Answer marks:\n  \
                  correct     T Y 1 +\n  \
                  incorrect   F N 0 -"
)]
struct Args {
    /// Answer sequence (defaults to the reference sequence)
    #[arg(short, long, conflicts_with = "interactive")]
    answers: Option<String>,

    /// Interactive mode - read one answer per line from stdin
    #[arg(short, long)]
    interactive: bool,

    /// JSON config file (initial_param, target_turnarounds, rule)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting parameter value
    #[arg(long)]
    initial: Option<f64>,

    /// Turnarounds that end the run
    #[arg(long)]
    target: Option<usize>,

    /// Geometric step factor (up: *factor, down: /factor)
    #[arg(long, conflicts_with = "linear")]
    factor: Option<f64>,

    /// Linear step size (up: +delta, down: -delta)
    #[arg(long)]
    linear: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show reason codes and turnaround values
    #[arg(long)]
    verbose: bool,

    /// Directory for run records
    #[arg(long, default_value = "./runs")]
    record_dir: PathBuf,

    /// Do not save a run record
    #[arg(long)]
    no_record: bool,

    /// Debug logging on stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;
    let mut procedure = StaircaseProcedure::from_config(&config)?;
    tracing::debug!(?config, "run configured");

    if args.interactive {
        run_interactive(&mut procedure, args)?;
    } else {
        let text = args.answers.as_deref().unwrap_or(REFERENCE_SEQUENCE);
        run_sequence(&mut procedure, &parse_answers(text)?, args)?;
    }

    finish(&procedure, args)
}

/// Config file first, then flag overrides
fn resolve_config(args: &Args) -> Result<StaircaseConfig> {
    let mut config = match &args.config {
        Some(path) => StaircaseConfig::load(path)?,
        None => StaircaseConfig::default(),
    };
    if let Some(initial) = args.initial {
        config.initial_param = initial;
    }
    if let Some(target) = args.target {
        config.target_turnarounds = target;
    }
    if let Some(factor) = args.factor {
        config.rule = StepRule::Geometric { factor };
    }
    if let Some(delta) = args.linear {
        config.rule = StepRule::Linear { delta };
    }
    config.validate()?;
    Ok(config)
}

/// Run a fixed answer sequence until it ends or the run finishes
fn run_sequence(
    procedure: &mut StaircaseProcedure<StepRule>,
    answers: &[bool],
    args: &Args,
) -> Result<()> {
    if !args.json {
        print_header(&procedure.config(), args.no_color);
    }

    for &answer in answers {
        let output = procedure.observe(answer)?;
        print_output(&output, args);
        if !output.continuing {
            break;
        }
    }

    let unused = answers.len() - procedure.trial_count();
    if unused > 0 {
        tracing::warn!(unused, "run finished before the answer sequence ended");
    }
    Ok(())
}

/// Read answers from stdin until the run finishes or the user quits
fn run_interactive(procedure: &mut StaircaseProcedure<StepRule>, args: &Args) -> Result<()> {
    if !args.json {
        print_header(&procedure.config(), args.no_color);
        println!("Enter T (correct) or F (incorrect) per trial. Type 'quit' to exit.");
        println!();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    while !procedure.is_terminal() {
        if !args.json {
            print!("{}", format_prompt(procedure, args.no_color));
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match parse_answer_line(line) {
            Ok(answer) => {
                let output = procedure.observe(answer)?;
                print_output(&output, args);
            }
            Err(e) => eprintln!("  {} (use T or F)", e),
        }
    }
    Ok(())
}

/// Print the summary and save the record
fn finish(procedure: &StaircaseProcedure<StepRule>, args: &Args) -> Result<()> {
    let record = capture_record(procedure);

    if args.json {
        println!("{}", serde_json::to_string(&record)?);
    } else {
        print_summary(procedure, args.no_color);
    }

    if !args.no_record {
        let path = save_record(&record, &args.record_dir)?;
        if !args.json {
            println!("Run record saved: {}", path.display());
        }
    }
    Ok(())
}

fn print_header(config: &StaircaseConfig, no_color: bool) {
    let (bold, reset) = if no_color { ("", "") } else { ("\x1b[1m", "\x1b[0m") };
    println!("{}Staircase v{} - start={} target={} rule={}{}",
        bold, VERSION, config.initial_param, config.target_turnarounds, config.rule, reset);
    println!();
}

fn format_prompt(procedure: &StaircaseProcedure<StepRule>, no_color: bool) -> String {
    let phase = procedure.phase();
    let body = format!(
        "[#{} param={} | {}/{}]",
        procedure.trial_count() + 1,
        procedure.current_param(),
        procedure.turnarounds().len(),
        procedure.target_turnarounds()
    );
    if no_color {
        format!("{} > ", body)
    } else {
        format!("{}{}{} > ", phase.color_code(), body, Phase::color_reset())
    }
}

fn print_output(output: &StepOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to serialize step output"),
        }
        return;
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }

    if args.verbose {
        let (dim, reset) = if args.no_color { ("", "") } else { ("\x1b[90m", "\x1b[0m") };
        match output.turnaround {
            Some(value) if output.reason.is_turnaround() => {
                println!("{}  └─ {} (recorded {}){}", dim, output.reason, value, reset)
            }
            Some(value) => println!(
                "{}  └─ {} (final turnaround {}){}",
                dim, output.reason, value, reset
            ),
            None => println!("{}  └─ {}{}", dim, output.reason, reset),
        }
    }
}

fn print_summary(procedure: &StaircaseProcedure<StepRule>, no_color: bool) {
    let (green, yellow, reset) = if no_color {
        ("", "", "")
    } else {
        ("\x1b[32m", "\x1b[33m", "\x1b[0m")
    };

    println!();
    println!("Trials: {} | Turnarounds: {:?}", procedure.trial_count(), procedure.turnarounds());
    match procedure.result() {
        Ok(threshold) if procedure.is_terminal() => {
            println!("{}Threshold estimate: {}{}", green, threshold, reset);
        }
        Ok(threshold) => {
            println!(
                "{}Run incomplete ({}/{} turnarounds). Provisional estimate: {}{}",
                yellow,
                procedure.turnarounds().len(),
                procedure.target_turnarounds(),
                threshold,
                reset
            );
        }
        Err(e) => println!("{}Run incomplete: {}{}", yellow, e, reset),
    }
}
