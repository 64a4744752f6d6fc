use std::io::{self, Write as _};

use tutorstat_stats::raw_sample::{DispersionResult, RawSampleStatistics};

use crate::util::{self, Output, OutputArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// Comma-separated sample values, e.g. "600,470,170,430,300"
    #[arg(allow_hyphen_values = true)]
    pub values: Option<String>,
    #[clap(flatten)]
    pub output: OutputArg,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let values = util::parse_optional_list::<f64>("sample value", arg.values.as_deref())?;
    tracing::info!(
        count = ?values.as_ref().map(Vec::len),
        "describing raw sample"
    );
    let stats = RawSampleStatistics::from_optional(values)?.run()?;
    arg.output
        .emit(&stats, |out, precision| write_report(out, &stats, precision))
}

fn write_report(out: &mut Output, stats: &DispersionResult, p: usize) -> io::Result<()> {
    writeln!(out, "Raw Sample Statistics (n = {})", stats.count)?;
    writeln!(out, "==============================")?;
    writeln!(out, "  Sum:                {:.p$}", stats.sum)?;
    writeln!(out, "  Mean:               {:.p$}", stats.mean)?;
    writeln!(out, "  Median:             {:.p$}", stats.median)?;
    if stats.mode.is_empty() {
        writeln!(out, "  Mode:               none (no repeated values)")?;
    } else {
        writeln!(out, "  Mode:               {}", util::format_values(&stats.mode, p))?;
    }
    writeln!(out, "  Min:                {:.p$}", stats.min)?;
    writeln!(out, "  Max:                {:.p$}", stats.max)?;
    writeln!(out, "  Range:              {:.p$}", stats.range)?;
    match &stats.quartiles {
        Some(q) => {
            writeln!(out, "  Lower quartile Q1:  {:.p$}", q.q1)?;
            writeln!(out, "  Upper quartile Q3:  {:.p$}", q.q3)?;
            writeln!(out, "  IQR (Q3 - Q1):      {:.p$}", q.iqr)?;
        }
        None => writeln!(out, "  Quartiles:          n/a (at least 4 values needed)")?,
    }
    writeln!(out, "  Variance:           {:.p$}", stats.variance)?;
    writeln!(out, "  Standard deviation: {:.p$}", stats.std_dev)?;
    Ok(())
}
