use std::io::{self, Write as _};

use tutorstat_stats::rank_correlation::{CorrelationResult, RankCorrelationEngine};

use crate::util::{self, Output, OutputArg};

const MIN_PAIRS: usize = 2;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SpearmanArg {
    /// Comma-separated scores of the first variable
    #[arg(long, allow_hyphen_values = true)]
    pub first: Option<String>,
    /// Comma-separated scores of the second variable, paired with the first
    #[arg(long, allow_hyphen_values = true)]
    pub second: Option<String>,
    #[clap(flatten)]
    pub output: OutputArg,
}

pub(crate) fn run(arg: &SpearmanArg) -> anyhow::Result<()> {
    let first = util::parse_optional_list::<f64>("first score", arg.first.as_deref())?;
    let second = util::parse_optional_list::<f64>("second score", arg.second.as_deref())?;
    let engine = RankCorrelationEngine::from_optional(first, second)?;
    anyhow::ensure!(
        engine.pair_count() >= MIN_PAIRS,
        "At least {MIN_PAIRS} pairs of scores are required, got {}",
        engine.pair_count()
    );
    let result = engine.run();
    tracing::info!(pairs = result.pair_count(), "computed spearman rank correlation");
    arg.output
        .emit(&result, |out, precision| write_report(out, &result, precision))
}

fn write_report(out: &mut Output, result: &CorrelationResult, p: usize) -> io::Result<()> {
    writeln!(out, "Spearman's Rank Correlation (n = {})", result.pair_count())?;
    writeln!(out, "===================================")?;
    writeln!(
        out,
        "{:>12} {:>8} {:>12} {:>8} {:>10} {:>10}",
        "score 1", "rank 1", "score 2", "rank 2", "d", "d²"
    )?;
    let rows = result
        .first
        .iter()
        .zip(&result.second)
        .zip(result.differences.iter().zip(&result.squared_differences));
    for ((a, b), (d, d2)) in rows {
        writeln!(
            out,
            "{:>12.p$} {:>8.1} {:>12.p$} {:>8.1} {:>10.2} {:>10.2}",
            a.score, a.rank, b.score, b.rank, d, d2
        )?;
    }
    writeln!(out)?;
    writeln!(out, "  Σd²:         {:.p$}", result.sum_squared_differences)?;
    writeln!(out, "  rs:          {:.p$}", result.coefficient)?;
    writeln!(out, "  Interpreted: {}", result.label)?;
    Ok(())
}
