use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env, Target};
use log::info;
use sbp1d_core::{
    inspection::{self, BundleReport},
    io::{OperatorConfig, OutputConfig, SweepFile},
    sweep::{self, OperatorRequest, SweepEntry},
};

#[derive(Parser, Debug)]
#[command(name = "sbp1d", about = "Build and inspect 1D summation-by-parts operators")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Only log warnings and errors (stderr)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one operator set and print its diagnostics
    Build(BuildArgs),
    /// Build every combination listed in a [sweep] table
    Sweep(SweepArgs),
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    /// TOML configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Interior order (6 or 8)
    #[arg(long)]
    order: Option<u32>,
    /// Number of grid points
    #[arg(long)]
    points: Option<usize>,
    /// Domain length
    #[arg(long)]
    length: Option<f64>,
    /// 0 = wide, 1 = intermediate, 2 = narrow
    #[arg(long)]
    narrowing: Option<u8>,
    /// Write H, D1, D2, M, Q and x as CSV into this directory
    #[arg(long)]
    dump_dir: Option<PathBuf>,
    /// Highest monomial degree in the exactness table
    #[arg(long)]
    degree: Option<usize>,
}

#[derive(clap::Args, Debug)]
struct SweepArgs {
    /// TOML file with a [sweep] table
    #[arg(short, long)]
    config: PathBuf,
    /// Path to CSV output (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "warn" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .target(Target::Stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("[cli] error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build(args) => build(args),
        Command::Sweep(args) => run_sweep(args),
    }
}

fn build(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (request, output) = resolve_build(&args)?;
    info!(
        "[cli] building order {} operators on {} points (length {}, narrowing {})",
        request.order, request.points, request.length, request.narrowing
    );
    let bundle = request.construct()?;
    let report = inspection::inspect(&bundle, output.exactness_degree);
    print!("{report}");

    if let Some(dir) = output.dump_dir.as_deref() {
        let paths = inspection::dump_bundle(dir, &bundle)?;
        info!("[cli] wrote {} files to {}", paths.len(), dir.display());
    }
    Ok(())
}

/// Merge the optional config file with the command-line overrides.
fn resolve_build(
    args: &BuildArgs,
) -> Result<(OperatorRequest, OutputConfig), Box<dyn std::error::Error>> {
    let (mut request, mut output) = match &args.config {
        Some(path) => {
            info!("[cli] loading config {}", path.display());
            let config = OperatorConfig::from_file(path)?;
            (config.request(), config.output)
        }
        None => {
            let (Some(order), Some(points)) = (args.order, args.points) else {
                return Err("either --config or both --order and --points are required".into());
            };
            let request = OperatorRequest {
                order,
                points,
                length: 1.0,
                narrowing: 0,
            };
            (request, OutputConfig::default())
        }
    };
    if let Some(order) = args.order {
        request.order = order;
    }
    if let Some(points) = args.points {
        request.points = points;
    }
    if let Some(length) = args.length {
        request.length = length;
    }
    if let Some(narrowing) = args.narrowing {
        request.narrowing = narrowing;
    }
    if let Some(dir) = &args.dump_dir {
        output.dump_dir = Some(dir.clone());
    }
    if let Some(degree) = args.degree {
        output.exactness_degree = degree;
    }
    Ok((request, output))
}

fn run_sweep(args: SweepArgs) -> Result<(), Box<dyn std::error::Error>> {
    info!("[cli] loading sweep {}", args.config.display());
    let file = SweepFile::from_file(&args.config)?;
    let entries = sweep::run_sweep(&file.sweep);
    emit_csv(&entries, args.output.as_deref())?;
    let failed = entries.iter().filter(|e| !e.succeeded()).count();
    match &args.output {
        Some(path) => info!("[cli] wrote {} rows to {}", entries.len(), path.display()),
        None => info!("[cli] wrote {} rows to stdout", entries.len()),
    }
    if failed > 0 {
        return Err(format!("{failed} of {} requests failed", entries.len()).into());
    }
    Ok(())
}

fn emit_csv(entries: &[SweepEntry], dest: Option<&Path>) -> io::Result<()> {
    let mut writer: Box<dyn Write> = match dest {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    writeln!(
        writer,
        "index,order,points,length,narrowing,h,sbp_residual,min_norm_weight,d2_half_bandwidth,millis,error"
    )?;
    for entry in entries {
        let r = &entry.request;
        write!(
            writer,
            "{},{},{},{},{},",
            entry.index, r.order, r.points, r.length, r.narrowing
        )?;
        let millis = entry.duration.as_secs_f64() * 1e3;
        match &entry.outcome {
            Ok(bundle) => {
                let report: BundleReport = inspection::inspect(bundle, 0);
                writeln!(
                    writer,
                    "{:.17e},{:.3e},{:.6e},{},{millis:.3},",
                    bundle.h, report.sbp_residual, report.min_norm_weight, report.d2_half_bandwidth
                )?;
            }
            Err(err) => writeln!(writer, ",,,,{millis:.3},\"{err}\"")?,
        }
    }
    writer.flush()
}
