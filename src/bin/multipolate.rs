//! Command-line driver: interpolate a grid file at one or more points.
//!
//! Queries are taken from the command line, or read from stdin one point per
//! line when none are given. Each result is printed as one line of
//! whitespace-separated output values.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use multipolator::{io::read_grid, GridLayout, Limits, Multipolator};
use tracing_subscriber::EnvFilter;

/// Interpolate a gridded lookup table at arbitrary points.
#[derive(Parser, Debug)]
#[command(name = "multipolate", version)]
struct Cli {
    /// Grid file of raw native-endian f64 values.
    grid: PathBuf,

    /// Number of dimensions, for grid files without an embedded header.
    #[arg(long, requires_all = ["row_width", "samples"])]
    dims: Option<usize>,

    /// Width of each parameter row, for grid files without an embedded header.
    #[arg(long, requires = "dims")]
    row_width: Option<usize>,

    /// Output values per grid point, for grid files without an embedded header.
    #[arg(long, requires = "dims")]
    samples: Option<usize>,

    /// Maximum number of dimensions accepted.
    #[arg(long, default_value_t = Limits::default().max_dims)]
    max_dims: usize,

    /// Maximum number of grid values accepted along any dimension.
    #[arg(long, default_value_t = Limits::default().max_values)]
    max_values: usize,

    /// Repeat the query this many times, scaling it by `--factor` after each step.
    #[arg(long, default_value_t = 1)]
    sweep: usize,

    /// Scale applied to every coordinate between sweep steps.
    #[arg(long, default_value_t = 1.0)]
    factor: f64,

    /// Query point, one value per dimension. Read from stdin if omitted.
    #[arg(allow_negative_numbers = true)]
    query: Vec<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let grid = read_grid(&cli.grid)
        .with_context(|| format!("failed to read grid file {}", cli.grid.display()))?;
    let layout = match (cli.dims, cli.row_width, cli.samples) {
        (Some(d), Some(w), Some(m)) => GridLayout::detached(d, w, m),
        _ => GridLayout::from_header(&grid).context("failed to read grid header")?,
    };
    let limits = Limits {
        max_dims: cli.max_dims,
        max_values: cli.max_values,
    };
    let interpolator: Multipolator<'_, f64> =
        Multipolator::new(&grid, &layout, &limits).context("invalid grid")?;
    tracing::info!(
        ndims = interpolator.ndims(),
        shape = ?interpolator.space().shape(),
        nsamples = interpolator.nsamples(),
        "loaded grid"
    );

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let mut out = vec![0.0; interpolator.nsamples()];

    if !cli.query.is_empty() {
        let mut query = cli.query.clone();
        for step in 0..cli.sweep {
            interpolator
                .interp_one(&query, &mut out)
                .with_context(|| format!("sweep step {step} at {query:?}"))?;
            write_line(&mut stdout, &out)?;
            query.iter_mut().for_each(|q| *q *= cli.factor);
        }
        return Ok(());
    }

    for (lineno, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("failed to read query from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let query = parse_query(&line, interpolator.ndims())
            .with_context(|| format!("bad query on line {}", lineno + 1))?;
        interpolator
            .interp_one(&query, &mut out)
            .with_context(|| format!("query on line {}", lineno + 1))?;
        write_line(&mut stdout, &out)?;
    }

    Ok(())
}

/// Parse one whitespace-separated query point with exactly `ndims` values.
fn parse_query(line: &str, ndims: usize) -> Result<Vec<f64>> {
    let query = line
        .split_whitespace()
        .map(|s| s.parse::<f64>().with_context(|| format!("not a number: {s:?}")))
        .collect::<Result<Vec<f64>>>()?;
    if query.len() != ndims {
        bail!("expected {ndims} values, found {}", query.len());
    }
    Ok(query)
}

fn write_line(w: &mut impl Write, values: &[f64]) -> Result<()> {
    let line: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    writeln!(w, "{}", line.join(" ")).context("failed to write output")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_query() {
        assert_eq!(parse_query(" 1.5  -2 3e2 ", 3).unwrap(), vec![1.5, -2.0, 300.0]);
        assert!(parse_query("1.5 2", 3).is_err());
        assert!(parse_query("1.5 x 2", 3).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["multipolate", "grid.bin", "0.5", "-1.5"]).unwrap();
        assert_eq!(cli.query, vec![0.5, -1.5]);
        assert_eq!(cli.sweep, 1);
        assert!(cli.dims.is_none());

        let cli = Cli::try_parse_from([
            "multipolate",
            "grid.bin",
            "--dims",
            "2",
            "--row-width",
            "4",
            "--samples",
            "3",
        ])
        .unwrap();
        assert_eq!((cli.dims, cli.row_width, cli.samples), (Some(2), Some(4), Some(3)));

        // Detached layout needs all three counts
        assert!(Cli::try_parse_from(["multipolate", "grid.bin", "--dims", "2"]).is_err());
    }
}
