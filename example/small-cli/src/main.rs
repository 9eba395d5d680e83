mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use small::analysis::{AnalysisConfig, WideningStrategy};
use small::ast::Function;
use small::cfg::Cfg;
use small::interval::{IntervalLattice, interval_analysis_with};
use small::lattice::enumerate;
use small::parser::parse_program;
use small::zero::{ZeroLattice, zero_analysis};
use strsim::levenshtein;
use tracing_subscriber::EnvFilter;

use crate::report::FunctionReport;

#[derive(Parser)]
#[command(name = "small")]
#[command(about = "Abstract interpretation for the Small language", long_about = None)]
struct Cli {
    /// Log more: `-v` for debug, `-vv` for trace. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a source file and print the environment at every program point
    Analyze(AnalyzeArgs),
    /// Print the control-flow graph of each function in a source file
    Cfg {
        file: PathBuf,
        /// Only this function
        #[arg(short, long)]
        function: Option<String>,
    },
    /// List the values of a lattice, bottom first
    Lattice {
        #[arg(value_enum)]
        analysis: AnalysisKind,
        /// Interval lattice bound N
        #[arg(long, default_value_t = 500)]
        interval_size: u32,
        /// Stop after this many values
        #[arg(long, default_value_t = 64)]
        limit: usize,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    file: PathBuf,
    #[arg(short, long, value_enum, default_value_t = AnalysisKind::Zero)]
    analysis: AnalysisKind,
    /// Only this function
    #[arg(short, long)]
    function: Option<String>,
    /// Worklist iterations before a run is aborted
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,
    /// Interval lattice bound N
    #[arg(long, default_value_t = 500)]
    interval_size: u32,
    /// `never`, `loop-heads` or `delayed:N`
    #[arg(long, value_parser = parse_widening)]
    widening: Option<WideningStrategy>,
    /// Also print every rule that fired
    #[arg(long)]
    explain: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AnalysisKind {
    Zero,
    Interval,
}

fn parse_widening(text: &str) -> Result<WideningStrategy, String> {
    match text {
        "never" => Ok(WideningStrategy::Never),
        "loop-heads" => Ok(WideningStrategy::LoopHeads),
        _ => match text.strip_prefix("delayed:") {
            Some(count) => count
                .parse()
                .map(WideningStrategy::Delayed)
                .map_err(|err| format!("invalid delay `{count}`: {err}")),
            None => Err(format!(
                "unknown widening `{text}`, expected `never`, `loop-heads` or `delayed:N`"
            )),
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze(args) => analyze(&args),
        Command::Cfg { file, function } => {
            let functions = load(&file)?;
            for function in select(&functions, function.as_deref())? {
                println!("function {}", function.name());
                print!("{}", Cfg::build(function));
            }
            Ok(())
        }
        Command::Lattice {
            analysis,
            interval_size,
            limit,
        } => {
            let values: Vec<String> = match analysis {
                AnalysisKind::Zero => enumerate(&ZeroLattice, limit)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                AnalysisKind::Interval => enumerate(&IntervalLattice::new(interval_size), limit)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            };
            for value in values {
                println!("{value}");
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn analyze(args: &AnalyzeArgs) -> Result<()> {
    let functions = load(&args.file)?;
    let config = AnalysisConfig::default()
        .with_max_iterations(args.max_iterations)
        .with_steps(args.explain);

    let mut reports = Vec::new();
    for function in select(&functions, args.function.as_deref())? {
        let cfg = Cfg::build(function);
        let report = match args.analysis {
            AnalysisKind::Zero => {
                let config = config.with_widening(args.widening.unwrap_or(WideningStrategy::Never));
                let result = zero_analysis()
                    .with_config(config)
                    .run_cfg(function, &cfg)
                    .with_context(|| format!("zero analysis of `{}` failed", function.name()))?;
                FunctionReport::new("zero", function, &cfg, &result)
            }
            AnalysisKind::Interval => {
                let config = config.with_widening(args.widening.unwrap_or_default());
                let lattice = IntervalLattice::new(args.interval_size);
                let result = interval_analysis_with(lattice)
                    .with_config(config)
                    .run_cfg(function, &cfg)
                    .with_context(|| {
                        format!("interval analysis of `{}` failed", function.name())
                    })?;
                FunctionReport::new("interval", function, &cfg, &result)
            }
        };
        tracing::info!(
            function = function.name(),
            iterations = report.iterations,
            "analysis finished"
        );
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{report}");
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<Vec<Function>> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_program(&src).with_context(|| format!("failed to parse {}", path.display()))
}

fn select<'a>(functions: &'a [Function], name: Option<&str>) -> Result<Vec<&'a Function>> {
    let Some(name) = name else {
        return Ok(functions.iter().collect());
    };
    if let Some(function) = functions.iter().find(|function| function.name() == name) {
        return Ok(vec![function]);
    }
    let suggestion = functions
        .iter()
        .map(Function::name)
        .min_by_key(|candidate| levenshtein(name, candidate))
        .filter(|candidate| levenshtein(name, candidate) <= 3);
    match suggestion {
        Some(candidate) => bail!("no function named `{name}`; did you mean `{candidate}`?"),
        None => bail!("no function named `{name}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_widening() {
        assert_eq!(parse_widening("never"), Ok(WideningStrategy::Never));
        assert_eq!(parse_widening("loop-heads"), Ok(WideningStrategy::LoopHeads));
        assert_eq!(parse_widening("delayed:3"), Ok(WideningStrategy::Delayed(3)));
        assert!(parse_widening("delayed:x").is_err());
        assert!(parse_widening("always").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
