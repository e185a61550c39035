mod error;
mod table;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use wp_sim::{EnergySummary, generate_efficiency_map, run_series};

#[derive(Parser)]
#[command(name = "wp-cli")]
#[command(about = "WavePTO CLI - hydraulic pump/motor PTO loss and efficiency analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and values
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Evaluate a force/velocity time series
    Evaluate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// CSV with time,force,velocity columns
        series_path: PathBuf,
        /// Write the solved sample table to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate the steady-state efficiency map
    Map {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Write the map cells to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Evaluate {
            project_path,
            series_path,
            output,
        } => cmd_evaluate(&project_path, &series_path, output.as_deref()),
        Commands::Map {
            project_path,
            output,
        } => cmd_map(&project_path, output.as_deref()),
    }
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = wp_project::load(project_path)?;
    project.device_parameters()?;
    project.analysis_options()?;
    project.map_request()?;
    println!("✓ Project is valid: {}", project.name);
    Ok(())
}

fn cmd_evaluate(project_path: &Path, series_path: &Path, output: Option<&Path>) -> CliResult<()> {
    let project = wp_project::load(project_path)?;
    let device = project.device_parameters()?;
    let opts = project.analysis_options()?;
    let samples = table::read_series(series_path)?;
    tracing::info!(
        samples = samples.len(),
        series = %series_path.display(),
        "evaluating series"
    );

    let result = run_series(&samples, &device, &opts)?;
    print_summary(&result.summary);

    if let Some(path) = output {
        table::write_solved(path, &result.solved)?;
        println!(
            "✓ Exported {} solved samples to {}",
            result.solved.len(),
            path.display()
        );
    }
    Ok(())
}

fn cmd_map(project_path: &Path, output: Option<&Path>) -> CliResult<()> {
    let project = wp_project::load(project_path)?;
    let (params, req) = project.map_request()?.ok_or(CliError::NoMap)?;
    let map = generate_efficiency_map(&params, &req)?;

    println!("\nEfficiency map:");
    println!("  Speed: {:.1} rad/s  Scale: {}", map.speed, map.scale);
    println!("  Displacement: {}", req.frac_disp);
    println!("  Pressure:     {} Pa", req.delta_p);
    println!("  Cells: {} x {}", map.rows(), map.cols());
    if let Some(best) = map.best() {
        println!(
            "  Best cell: x={:.3} dp={:.3e} Pa ({}) vol={:.4} torque={:.4}",
            best.frac_disp,
            best.delta_p,
            best.quadrant,
            best.volumetric_efficiency,
            best.torque_efficiency
        );
    }

    if let Some(path) = output {
        table::write_map(path, &map)?;
        println!("✓ Exported {} cells to {}", map.cells.len(), path.display());
    }
    Ok(())
}

fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

fn print_summary(s: &EnergySummary) {
    println!("\nSeries summary:");
    println!("  Samples: {}", s.sample_count);
    println!("  Time range: {:.3} - {:.3} s", s.start_time, s.end_time);
    if s.infeasible_count > 0 || s.residual_mismatch_count > 0 {
        println!(
            "  Flagged: {} infeasible, {} residual mismatch",
            s.infeasible_count, s.residual_mismatch_count
        );
    }

    println!("\nEnergy:");
    println!("  Work in:  {:.3e} J", s.work_in);
    println!("  Work out: {:.3e} J", s.work_out);
    println!("  Net efficiency: {}", fmt_opt(s.net_efficiency, 4));
    println!("  Leakage loss:    {:.3e} J", s.leakage_energy);
    println!("  Mechanical loss: {:.3e} J", s.mechanical_loss_energy);
    println!("  Electrical loss: {:.3e} J", s.electrical_loss_energy);
    println!(
        "  Split-sign efficiency: {}  (time-average {})",
        fmt_opt(s.split_efficiency, 4),
        fmt_opt(s.mean_instantaneous_efficiency, 4)
    );

    println!("\nWindow {:.3} s:", s.window_duration);
    println!("  Avg power in:  {} W", fmt_opt(s.avg_power_in, 1));
    println!("  Avg power out: {} W", fmt_opt(s.avg_power_out, 1));
    if s.capture_width_ratio.is_some() {
        println!(
            "  Capture-width ratio: {} (hydraulic {})",
            fmt_opt(s.capture_width_ratio, 4),
            fmt_opt(s.hydraulic_capture_width_ratio, 4)
        );
    }
}
