//! Command implementations for the snow drift CLI.
//!
//! Provides subcommands for computing seasonal snow drift transport and
//! fence heights, either from the Open-Meteo archive or from a local
//! hourly observations CSV.

use clap::Subcommand;

pub mod analyze;
pub mod local;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch hourly weather from the Open-Meteo archive and compute
    /// per-season snow drift transport
    Analyze {
        /// Latitude of the point of interest, decimal degrees
        #[arg(long)]
        latitude: f64,

        /// Longitude of the point of interest, decimal degrees
        #[arg(long)]
        longitude: f64,

        /// First season start year (season runs Jul 1 to Jun 30)
        #[arg(long)]
        start_year: i32,

        /// Last season start year
        #[arg(long)]
        end_year: i32,

        /// Maximum transport distance T, meters
        #[arg(long, default_value_t = 3000.0)]
        transport_distance: f64,

        /// Fetch distance F, meters
        #[arg(long, default_value_t = 30000.0)]
        fetch_distance: f64,

        /// Relocation coefficient theta, in (0, 1]
        #[arg(long, default_value_t = 0.5)]
        relocation_coeff: f64,

        /// Fence type for height sizing: wyoming, slat-and-wire, or solid
        #[arg(long, default_value = "wyoming")]
        fence_type: String,

        /// Output path for the per-season results CSV
        #[arg(short = 'o', long)]
        output_csv: Option<String>,
    },

    /// Compute per-season snow drift transport from a local hourly
    /// observations CSV
    AnalyzeCsv {
        /// Path to an hourly observations CSV
        /// (timestamp,temperature,precipitation,wind_speed,wind_direction)
        #[arg(short = 'i', long)]
        observations_csv: String,

        /// Maximum transport distance T, meters
        #[arg(long, default_value_t = 3000.0)]
        transport_distance: f64,

        /// Fetch distance F, meters
        #[arg(long, default_value_t = 30000.0)]
        fetch_distance: f64,

        /// Relocation coefficient theta, in (0, 1]
        #[arg(long, default_value_t = 0.5)]
        relocation_coeff: f64,

        /// Fence type for height sizing: wyoming, slat-and-wire, or solid
        #[arg(long, default_value = "wyoming")]
        fence_type: String,

        /// Output path for the per-season results CSV
        #[arg(short = 'o', long)]
        output_csv: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze {
            latitude,
            longitude,
            start_year,
            end_year,
            transport_distance,
            fetch_distance,
            relocation_coeff,
            fence_type,
            output_csv,
        } => {
            analyze::run_analyze(
                latitude,
                longitude,
                start_year,
                end_year,
                sdt_drift::transport::TablerParams {
                    transport_distance,
                    fetch_distance,
                    relocation_coeff,
                },
                &fence_type,
                output_csv.as_deref(),
            )
            .await
        }
        Command::AnalyzeCsv {
            observations_csv,
            transport_distance,
            fetch_distance,
            relocation_coeff,
            fence_type,
            output_csv,
        } => {
            local::run_local(
                &observations_csv,
                sdt_drift::transport::TablerParams {
                    transport_distance,
                    fetch_distance,
                    relocation_coeff,
                },
                &fence_type,
                output_csv.as_deref(),
            )
        }
    }
}
