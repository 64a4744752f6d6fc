use std::io::{self, Write as _};

use tutorstat_stats::frequency::{DiscreteFrequencyStatistics, FrequencyMoments};

use crate::util::{self, Output, OutputArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DiscreteArg {
    /// Comma-separated values (x)
    #[arg(long, allow_hyphen_values = true)]
    pub values: Option<String>,
    /// Comma-separated frequencies (f), one per value
    #[arg(long, allow_hyphen_values = true)]
    pub frequencies: Option<String>,
    #[clap(flatten)]
    pub output: OutputArg,
}

pub(crate) fn run(arg: &DiscreteArg) -> anyhow::Result<()> {
    let values = util::parse_optional_list::<f64>("value", arg.values.as_deref())?;
    let frequencies = util::parse_optional_list::<i64>("frequency", arg.frequencies.as_deref())?;
    tracing::info!(
        rows = ?values.as_ref().map(Vec::len),
        "computing discrete frequency table"
    );
    let moments = DiscreteFrequencyStatistics::from_optional(values, frequencies)?.run();
    arg.output
        .emit(&moments, |out, precision| write_report(out, &moments, precision))
}

fn write_report(out: &mut Output, moments: &FrequencyMoments, p: usize) -> io::Result<()> {
    writeln!(out, "Discrete Frequency Table")?;
    writeln!(out, "========================")?;
    writeln!(out, "{:>12} {:>8} {:>14} {:>16}", "x", "f", "fx", "fx²")?;
    for row in &moments.rows {
        writeln!(
            out,
            "{:>12.p$} {:>8} {:>14.p$} {:>16.p$}",
            row.x, row.f, row.fx, row.fx2
        )?;
    }
    writeln!(out)?;
    write_summary(out, moments, p)
}

/// Sums and moments shared by the discrete and continuous reports.
pub(super) fn write_summary(
    out: &mut Output,
    moments: &FrequencyMoments,
    p: usize,
) -> io::Result<()> {
    writeln!(out, "  Σf:                 {}", moments.sum_f)?;
    writeln!(out, "  Σfx:                {:.p$}", moments.sum_fx)?;
    writeln!(out, "  Σfx²:               {:.p$}", moments.sum_fx2)?;
    writeln!(out, "  Mean (Σfx / Σf):    {:.p$}", moments.mean)?;
    writeln!(out, "  Variance:           {:.p$}", moments.variance)?;
    writeln!(out, "  Standard deviation: {:.p$}", moments.std_dev)?;
    Ok(())
}
