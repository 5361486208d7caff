use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::debug;

use apex::utilities::{self, PairedWriter};
use apex::{Timing, ToolOptions, ToolOutput, Workload, tools};

const NUMBERS: [i64; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

fn main() -> ExitCode {
    setup_logging();

    match run_main(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(?error, "main_failure");
            utilities::error(&format!("{error:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so recorded rows on stdout stay clean
fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("APEX_LOG"))
        .with_writer(std::io::stderr)
        .init();
}

fn run_main(args: impl Iterator<Item = String>) -> Result<()> {
    let input = BenchmarkInput::from_arguments(args)?;
    debug!(?input, "arguments");

    if input.help {
        println!("apex");
        println!(
            "usage: apex <iterations> [--sweep <steps>] [--write-results-to <path>] [--append] [--print] [--format plain|csv|json]"
        );
        return Ok(());
    }

    if input.sweep == 0 {
        bail!("--sweep requires at least one step");
    }
    if input.format != OutputFormat::Plain && !input.print && input.write_results_to.is_none() {
        bail!("--format requires --print or --write-results-to");
    }
    if input.append && input.write_results_to.is_none() {
        bail!("--append requires --write-results-to");
    }
    if input.append && input.format != OutputFormat::Plain {
        bail!("--append requires the plain format");
    }

    let mut rows: Vec<Timing> = Vec::new();

    // Prior rows are re-read before the results file is truncated below
    if input.append
        && let Some(path) = &input.write_results_to
        && Path::new(path).exists()
    {
        let file = File::open(path).with_context(|| format!("failed to open {path:?}"))?;
        let prior = timings_parser::parse(BufReader::new(file))
            .with_context(|| format!("failed to read prior results from {path:?}"))?;
        rows.extend(prior.into_iter().map(|row| Timing {
            iterations: row.iterations,
            elapsed: Duration::from_nanos(row.nanoseconds),
        }));
    }

    let results_file = if let Some(path) = &input.write_results_to {
        let path = Path::new(path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {parent}", parent = parent.display()))?;
        }
        Some(
            File::create(path)
                .with_context(|| format!("failed to create {path}", path = path.display()))?,
        )
    } else {
        None
    };

    let writer = PairedWriter::new_from_option(input.print.then(std::io::stdout), results_file);

    let workload = Workload { values: &NUMBERS };

    for iterations in input.sweep_points() {
        let options = ToolOptions { iterations };
        match tools::wall_clock::run_wall_clock(workload, &options) {
            ToolOutput::WallClockTiming { timing } => {
                debug!(
                    elapsed = ?timing.elapsed,
                    "ran {count} iterations",
                    count = utilities::group_digits(timing.iterations)
                );
                rows.push(timing);
            }
            _ => bail!("wall clock tool returned unexpected output"),
        }
    }

    if let Some(mut writer) = writer {
        write_rows(&mut writer, &rows, input.format).context("failed to write results")?;
        writer.flush().context("failed to flush results")?;
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    CSV,
    JSON,
}

#[derive(Debug)]
pub struct BenchmarkInput {
    /// target iteration count for the scan loop
    pub iterations: i64,
    /// number of evenly spaced measurement points up to the target
    pub sweep: u64,
    /// plain, csv, json
    pub format: OutputFormat,
    pub write_results_to: Option<String>,
    /// keep rows already recorded in the results file
    pub append: bool,
    /// echo rows to stdout
    pub print: bool,
    pub help: bool,
}

impl BenchmarkInput {
    pub fn from_arguments(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut this = Self {
            iterations: 0,
            sweep: 1,
            format: OutputFormat::default(),
            write_results_to: None,
            append: false,
            print: false,
            help: false,
        };

        let mut iterations: Option<i64> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--info" | "--help" | "help" => {
                    this.help = true;
                    return Ok(this);
                }
                "--format" => {
                    let format = args.next().context("no format given")?;
                    this.format = match format.as_str() {
                        "plain" => OutputFormat::Plain,
                        "csv" => OutputFormat::CSV,
                        "json" => OutputFormat::JSON,
                        format => {
                            utilities::warning(&format!("unknown output format {format:?}"));
                            OutputFormat::Plain
                        }
                    };
                }
                "--sweep" => {
                    let steps = args.next().context("no sweep step count given")?;
                    this.sweep = steps
                        .parse()
                        .with_context(|| format!("invalid sweep step count {steps:?}"))?;
                }
                "--write-results-to" => {
                    this.write_results_to = Some(args.next().context("no results path given")?);
                }
                "--append" => {
                    this.append = true;
                }
                "--print" => {
                    this.print = true;
                }
                argument => {
                    if iterations.is_some() {
                        utilities::warning(&format!("ignoring extra argument {argument:?}"));
                        continue;
                    }
                    iterations = Some(
                        argument
                            .parse()
                            .with_context(|| format!("invalid iteration count {argument:?}"))?,
                    );
                }
            }
        }

        this.iterations = iterations.context("missing iteration count")?;

        Ok(this)
    }

    /// Iteration counts to measure, in increasing order, ending at the
    /// target. A negative target behaves as zero iterations.
    pub fn sweep_points(&self) -> impl Iterator<Item = u64> + '_ {
        let target = self.iterations.max(0) as u64;
        let steps = self.sweep;
        (1..=steps)
            .map(move |step| ((u128::from(target) * u128::from(step)) / u128::from(steps)) as u64)
    }
}

pub fn write_rows(
    to: &mut impl Write,
    rows: &[Timing],
    output_format: OutputFormat,
) -> std::io::Result<()> {
    let mut total = Timing::default();
    for row in rows {
        total += *row;
    }

    match output_format {
        OutputFormat::Plain => {
            for row in rows {
                writeln!(
                    to,
                    "{iterations} {nanoseconds}",
                    iterations = row.iterations,
                    nanoseconds = row.elapsed.as_nanos()
                )?;
            }
            Ok(())
        }
        OutputFormat::CSV => {
            writeln!(to, "iterations,nanoseconds")?;
            writeln!(to, "total,{nanoseconds}", nanoseconds = total.elapsed.as_nanos())?;
            for row in rows {
                writeln!(
                    to,
                    "{iterations},{nanoseconds}",
                    iterations = row.iterations,
                    nanoseconds = row.elapsed.as_nanos()
                )?;
            }
            Ok(())
        }
        OutputFormat::JSON => {
            let mut entries = vec![serde_json::json!({
                "total": total.elapsed.as_nanos() as u64,
            })];
            for row in rows {
                entries.push(serde_json::json!({
                    "iterations": row.iterations,
                    "nanoseconds": row.elapsed.as_nanos() as u64,
                }));
            }
            write!(to, "{entries}", entries = serde_json::Value::Array(entries))
        }
    }
}
