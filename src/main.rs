use anyhow::{bail, Result};
use clap::Parser;

use floodwatch_core::Sensitivity;
use floodwatch_location::{reverse_geocode, Geocoder, Location};
use floodwatch_risk::{AssessOptions, AssessmentReport, Assessor};

/// Flood risk assessment from satellite, weather, and elevation data
#[derive(Parser, Debug)]
#[command(name = "floodwatch")]
#[command(about = "Flood risk assessment and early warning", long_about = None)]
struct Args {
    /// Latitude of the target location
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude of the target location
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Place name to geocode instead of coordinates (e.g. "Kuala Lumpur")
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    place: Option<String>,

    /// Forecast horizon in days (1-7)
    #[arg(short, long)]
    days: Option<u32>,

    /// Risk sensitivity (low, medium, high)
    #[arg(short, long)]
    sensitivity: Option<Sensitivity>,

    /// Skip satellite imagery
    #[arg(long)]
    no_satellite: bool,

    /// Skip the weather forecast
    #[arg(long)]
    no_weather: bool,

    /// Skip elevation sampling
    #[arg(long)]
    no_elevation: bool,

    /// Skip historical flood exposure
    #[arg(long)]
    no_historical: bool,

    /// Emit the full report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    floodwatch_core::init()?;

    let args = Args::parse();

    let app = floodwatch_core::App::new()?;
    for warning in &app.warnings().warnings {
        eprintln!("warning: {warning}");
    }
    let config = app.config();

    let location = resolve_location(&args).await?;

    let options = AssessOptions {
        days: args.days.unwrap_or(config.weather.forecast_days).clamp(1, 7),
        sensitivity: args.sensitivity.unwrap_or(config.risk.sensitivity),
        use_satellite: !args.no_satellite,
        use_weather: !args.no_weather,
        use_elevation: !args.no_elevation,
        use_historical: !args.no_historical,
    };

    tracing::info!(
        "Assessing flood risk for {} over {} days",
        location.display_name(),
        options.days
    );

    let assessor = Assessor::new(config);
    let report = assessor.assess(&location, &options).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Resolve the target location from coordinates or a place name.
async fn resolve_location(args: &Args) -> Result<Location> {
    if let Some(place) = &args.place {
        let geocoder = Geocoder::new()?;
        return match geocoder.geocode(place).await {
            Ok(location) => Ok(location),
            Err(e) => bail!("{}", e.user_message()),
        };
    }

    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => {
            let mut location = match Location::new(lat, lon) {
                Ok(location) => location,
                Err(e) => bail!("{}", e.user_message()),
            };
            // Best effort: a readable name for the report header
            if let Some(name) = reverse_geocode(&location).await {
                location = location.with_name(name);
            }
            Ok(location)
        }
        _ => bail!("Provide a location with --lat/--lon or --place"),
    }
}

fn print_report(report: &AssessmentReport) {
    let assessment = &report.assessment;

    println!("FloodWatch - Flood Risk Assessment");
    println!(
        "Location: {} ({:.4}, {:.4})",
        report.location.display_name(),
        report.location.latitude,
        report.location.longitude
    );
    println!();
    println!(
        "  {} FLOOD RISK - {:.1}% probability",
        assessment.level.label(),
        assessment.score
    );
    println!();

    println!("Contributing factors:");
    for factor in &assessment.factors {
        println!(
            "  {:<20} {:>5.1}  (weight {:.2})",
            factor.kind.label(),
            factor.score,
            factor.kind.weight()
        );
    }
    println!();

    if !assessment.timeline.is_empty() {
        println!("Risk forecast:");
        for point in &assessment.timeline {
            println!("  {}  {:>5.1}%", point.date, point.risk_score);
        }
        println!();
    }

    if let Some(water) = &report.water {
        println!("Satellite: {}", water.summary);
    }
    if let Some(terrain) = &report.terrain {
        println!(
            "Terrain: {} (score {:.0})",
            terrain.terrain_type.label(),
            terrain.score
        );
        for factor in &terrain.factors {
            println!("  - {factor}");
        }
    }
    if let Some(forecast) = &report.forecast {
        println!(
            "Weather: {:.1}mm total rainfall expected, peak day {:.1}mm, {:.0}% humidity",
            forecast.total_rainfall(),
            forecast.max_daily_rainfall(),
            forecast.avg_humidity()
        );
    }
    if let Some(history) = &report.rainfall_history {
        println!(
            "Past {} days: {:.1}mm/day average, {:.1}mm peak",
            history.days.len(),
            history.average(),
            history.max()
        );
    }
    if let Some(alert) = &report.storm_alert {
        println!("Storm alert ({:?}): {}", alert.level, alert.description);
    }
    println!();

    println!("Recommendations:");
    for recommendation in &assessment.recommendations {
        println!("  - {recommendation}");
    }
    println!();

    println!("Data sources:");
    println!("  satellite:  {}", report.sources.satellite.describe());
    println!("  weather:    {}", report.sources.weather.describe());
    println!("  elevation:  {}", report.sources.elevation.describe());
    println!("  historical: {}", report.sources.historical.describe());
}
