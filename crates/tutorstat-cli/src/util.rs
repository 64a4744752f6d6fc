use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Context;

/// Output options shared by every subcommand.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct OutputArg {
    /// Number of decimal places in the text report
    #[arg(long, default_value_t = 3)]
    pub precision: usize,
    /// Print the result as JSON instead of a text report
    #[arg(long)]
    pub json: bool,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl OutputArg {
    /// Writes `value` as JSON, or the text produced by `report` otherwise.
    pub fn emit<T, F>(&self, value: &T, report: F) -> anyhow::Result<()>
    where
        T: serde::Serialize,
        F: FnOnce(&mut Output, usize) -> io::Result<()>,
    {
        let mut output = Output::from_output_path(self.output.clone())?;
        if self.json {
            return output.write_json(value);
        }
        report(&mut output, self.precision)
            .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
        output
            .flush()
            .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
        if let Output::File { path, .. } = &output {
            tracing::info!("report written to {}", path.display());
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Splits comma-separated text into parsed items.
///
/// Tokens are trimmed and empty tokens are skipped, so `""` yields an empty
/// list and `"1, 2,,3"` yields three items.
pub fn parse_list<T>(what: &str, text: &str) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            token.parse::<T>().map_err(|e| {
                anyhow::anyhow!("Invalid {what} item #{} ({token:?}): {e}", i + 1)
            })
        })
        .collect()
}

/// Like [`parse_list`], keeping an absent argument absent.
pub fn parse_optional_list<T>(what: &str, text: Option<&str>) -> anyhow::Result<Option<Vec<T>>>
where
    T: FromStr,
    T::Err: Display,
{
    text.map(|text| parse_list(what, text)).transpose()
}

/// Splits comma-separated labels without interpreting them.
pub fn split_labels(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn format_values(values: &[f64], precision: usize) -> String {
    values
        .iter()
        .map(|v| format!("{v:.precision$}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let values = parse_list::<f64>("value", " 1, 2.5,,-3 ").unwrap();
        assert_eq!(values, vec![1.0, 2.5, -3.0]);
        assert!(parse_list::<f64>("value", "").unwrap().is_empty());
    }

    #[test]
    fn test_parse_list_reports_bad_token() {
        let err = parse_list::<i64>("frequency", "1, x").unwrap_err();
        assert!(err.to_string().contains("frequency item #2"));
        assert!(parse_list::<i64>("frequency", "1.5").is_err());
    }

    #[test]
    fn test_parse_optional_list() {
        assert!(parse_optional_list::<f64>("value", None).unwrap().is_none());
        assert_eq!(
            parse_optional_list::<i64>("frequency", Some("4,-1")).unwrap(),
            Some(vec![4, -1])
        );
    }

    #[test]
    fn test_split_labels() {
        assert_eq!(split_labels("10-20, 20-30 ,"), vec!["10-20", "20-30"]);
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_values(&[1.0, 2.25], 2), "1.00, 2.25");
        assert_eq!(format_values(&[], 2), "");
    }
}
