//! Command-line front end for one dispatch batch over mock data.

pub mod export;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dispatch_core::config::{
    DispatchConfig, ServiceArea, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG,
    DEFAULT_MAX_RIDES_PER_BATCH, DEFAULT_RADIUS_KM, DEFAULT_SPREAD_DEG,
};
use dispatch_core::geo::Coordinate;
use dispatch_core::runner::{run_batch, BatchReport};
use dispatch_core::sink::{InMemorySink, LogAlertSink};
use dispatch_core::sources::{MockDriverSource, MockRideSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "dispatch",
    about = "Assign a batch of mock rides to nearby drivers"
)]
pub struct Args {
    /// Pickup search radius in km
    #[arg(long, env = "DISPATCH_RADIUS_KM", default_value_t = DEFAULT_RADIUS_KM)]
    pub radius_km: f64,
    /// Service area center latitude
    #[arg(long, env = "DISPATCH_CENTER_LAT", default_value_t = DEFAULT_CENTER_LAT, allow_negative_numbers = true)]
    pub center_lat: f64,
    /// Service area center longitude
    #[arg(long, env = "DISPATCH_CENTER_LNG", default_value_t = DEFAULT_CENTER_LNG, allow_negative_numbers = true)]
    pub center_lng: f64,
    /// Half-width of the service area in degrees
    #[arg(long, env = "DISPATCH_SPREAD_DEG", default_value_t = DEFAULT_SPREAD_DEG)]
    pub spread_deg: f64,
    /// Rides considered per batch; the rest are deferred
    #[arg(long, env = "DISPATCH_MAX_RIDES_PER_BATCH", default_value_t = DEFAULT_MAX_RIDES_PER_BATCH)]
    pub max_rides_per_batch: usize,
    /// Number of mock rides to generate
    #[arg(long, env = "DISPATCH_NUM_RIDES", default_value_t = 5)]
    pub num_rides: usize,
    /// Number of mock drivers to generate
    #[arg(long, env = "DISPATCH_NUM_DRIVERS", default_value_t = 4)]
    pub num_drivers: usize,
    /// Seed for mock data generation
    #[arg(long, env = "DISPATCH_SEED", default_value_t = 42)]
    pub seed: u64,
    /// Write per-ride outcomes to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn to_config(&self) -> DispatchConfig {
        DispatchConfig::default()
            .with_radius_km(self.radius_km)
            .with_area(ServiceArea::new(
                Coordinate::new(self.center_lat, self.center_lng),
                self.spread_deg,
            ))
            .with_max_rides_per_batch(self.max_rides_per_batch)
    }
}

/// Run one batch with mock sources and optionally export the outcomes.
pub fn run(args: &Args) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let config = args.to_config();
    let mut sink = InMemorySink::new();

    let report = run_batch(
        &config,
        &MockRideSource::new(args.num_rides, args.seed),
        &MockDriverSource::new(args.num_drivers, args.seed),
        &mut sink,
        &LogAlertSink,
    )?;

    log::info!(
        "batch done: {} rides fetched, {} drivers, {} assigned, {} deferred",
        report.fetched_rides,
        report.fetched_drivers,
        report.allocation.assigned_count(),
        report.deferred_rides.len()
    );
    for assignment in sink.assignments() {
        log::info!(
            "ride {} -> driver {} (cost {:.2}, {:.2} h to pickup)",
            assignment.ride_id,
            assignment.driver_id,
            assignment.total_cost,
            assignment.hours_to_pickup
        );
    }

    if let Some(path) = &args.output {
        let records = export::outcome_records(&report.allocation, &report.deferred_rides);
        match args.format {
            OutputFormat::Json => export::export_to_json(&records, path)?,
            OutputFormat::Csv => export::export_to_csv(&records, path)?,
        }
        log::info!("wrote {} outcomes to {}", records.len(), path.display());
    }

    Ok(report)
}
