use std::io::{self, Write as _};

use tutorstat_stats::continuous::{ContinuousFrequencyStatistics, ContinuousMoments};

use crate::{
    command::discrete,
    util::{self, Output, OutputArg},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ContinuousArg {
    /// Comma-separated class intervals, e.g. "10-20,20-30,30-50"
    #[arg(long, allow_hyphen_values = true)]
    pub intervals: Option<String>,
    /// Comma-separated frequencies (f), one per interval
    #[arg(long, allow_hyphen_values = true)]
    pub frequencies: Option<String>,
    #[clap(flatten)]
    pub output: OutputArg,
}

pub(crate) fn run(arg: &ContinuousArg) -> anyhow::Result<()> {
    let intervals = arg.intervals.as_deref().map(util::split_labels);
    let frequencies = util::parse_optional_list::<i64>("frequency", arg.frequencies.as_deref())?;
    tracing::info!(
        rows = ?intervals.as_ref().map(Vec::len),
        "computing continuous frequency table"
    );
    let result = ContinuousFrequencyStatistics::from_optional(intervals, frequencies)?.run()?;
    arg.output
        .emit(&result, |out, precision| write_report(out, &result, precision))
}

fn write_report(out: &mut Output, result: &ContinuousMoments, p: usize) -> io::Result<()> {
    writeln!(out, "Grouped Frequency Table")?;
    writeln!(out, "=======================")?;
    writeln!(
        out,
        "{:>16} {:>12} {:>8} {:>14} {:>16}",
        "class", "midpoint", "f", "fx", "fx²"
    )?;
    for (interval, row) in result.intervals.iter().zip(&result.moments.rows) {
        let class = format!("{}-{}", interval.lower, interval.upper);
        writeln!(
            out,
            "{class:>16} {:>12.p$} {:>8} {:>14.p$} {:>16.p$}",
            row.x, row.f, row.fx, row.fx2
        )?;
    }
    writeln!(out)?;
    discrete::write_summary(out, &result.moments, p)
}
