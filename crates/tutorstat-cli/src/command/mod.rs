use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use self::{
    continuous::ContinuousArg, describe::DescribeArg, discrete::DiscreteArg, spearman::SpearmanArg,
};

mod continuous;
mod describe;
mod discrete;
mod spearman;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Which statistic to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Mean, median, mode, quartiles and spread of a raw sample
    Describe(#[clap(flatten)] DescribeArg),
    /// Mean and spread of a discrete (value, frequency) table
    Discrete(#[clap(flatten)] DiscreteArg),
    /// Mean and spread of a grouped (interval, frequency) table
    Continuous(#[clap(flatten)] ContinuousArg),
    /// Spearman's rank correlation between two paired samples
    Spearman(#[clap(flatten)] SpearmanArg),
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    tracing_subscriber::fmt()
        .with_max_level(log_level(args.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match &args.mode {
        Mode::Describe(arg) => describe::run(arg),
        Mode::Discrete(arg) => discrete::run(arg),
        Mode::Continuous(arg) => continuous::run(arg),
        Mode::Spearman(arg) => spearman::run(arg),
    };
    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(2), Level::DEBUG);
        assert_eq!(log_level(9), Level::TRACE);
    }

    #[test]
    fn test_parse_spearman_with_negative_scores() {
        let args = CommandArgs::try_parse_from([
            "tutorstat", "-v", "spearman", "--first", "-1,2,3", "--second", "3,2,-1",
        ])
        .unwrap();
        assert_eq!(args.verbose, 1);
        let Mode::Spearman(arg) = args.mode else {
            panic!("expected spearman mode");
        };
        assert_eq!(arg.first.as_deref(), Some("-1,2,3"));
        assert_eq!(arg.second.as_deref(), Some("3,2,-1"));
    }

    #[test]
    fn test_parse_describe_output_options() {
        let args = CommandArgs::try_parse_from([
            "tutorstat",
            "describe",
            "1,2,3",
            "--precision",
            "1",
            "--json",
        ])
        .unwrap();
        let Mode::Describe(arg) = args.mode else {
            panic!("expected describe mode");
        };
        assert_eq!(arg.values.as_deref(), Some("1,2,3"));
        assert_eq!(arg.output.precision, 1);
        assert!(arg.output.json);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory as _;
        CommandArgs::command().debug_assert();
    }
}
