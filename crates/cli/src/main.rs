use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use congestiq_core::domain::inputs::{SafetyInputs, TrafficInputs};
use congestiq_core::domain::score;
use congestiq_core::weather::cache::CachedWeatherProvider;
use congestiq_core::weather::error::{LookupErrorKind, WeatherLookupError};
use congestiq_core::weather::provider::{OpenWeatherClient, WeatherProvider};

mod report;

#[derive(Debug, Parser)]
#[command(
    name = "congestiq",
    about = "Estimate congestion risk for a city from traffic and safety observations plus live weather"
)]
struct Args {
    /// City whose current weather feeds the estimate.
    #[arg(long, default_value = "Chennai")]
    city: String,

    /// Observed traffic density, percent of capacity (0-100).
    #[arg(long, default_value_t = 50)]
    density: u8,

    /// Observed average speed in km/h (0-120).
    #[arg(long = "avg-speed", default_value_t = 40)]
    avg_speed: u16,

    /// The observation falls within peak hours.
    #[arg(long)]
    peak_hour: bool,

    /// An accident was reported recently on the corridor.
    #[arg(long)]
    accident: bool,

    /// Road construction is active on the corridor.
    #[arg(long)]
    construction: bool,

    /// Observed helmet compliance, percent (0-100).
    #[arg(long = "helmet-usage", default_value_t = 70)]
    helmet_usage: u8,

    /// Observed seatbelt compliance, percent (0-100).
    #[arg(long = "seatbelt-usage", default_value_t = 80)]
    seatbelt_usage: u8,

    /// Speeding was observed.
    #[arg(long)]
    speeding: bool,

    /// Print the assessment as a single JSON document instead of a report.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = congestiq_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let traffic = TrafficInputs {
        density: args.density,
        avg_speed_kmh: args.avg_speed,
        peak_hour: args.peak_hour,
        recent_accident: args.accident,
        road_construction: args.construction,
    };
    let safety = SafetyInputs {
        helmet_usage: args.helmet_usage,
        seatbelt_usage: args.seatbelt_usage,
        speeding: args.speeding,
    };

    traffic.validate()?;
    safety.validate()?;

    let client = OpenWeatherClient::from_settings(&settings)?;
    let provider = CachedWeatherProvider::new(client);

    let weather = match provider.fetch_current(&args.city).await {
        Ok(weather) => weather,
        Err(err) => {
            if let Some(lookup) = err.downcast_ref::<WeatherLookupError>() {
                if lookup.kind == LookupErrorKind::NotFound {
                    anyhow::bail!("city {:?} not found by the weather service", args.city);
                }
            }
            sentry_anyhow::capture_anyhow(&err);
            return Err(err.context(format!("weather lookup for {:?} failed", args.city)));
        }
    };

    let breakdown = score::evaluate(&weather, &traffic, &safety);

    if args.json {
        report::print_json(&args.city, &weather, &breakdown)?;
    } else {
        report::print_text(&args.city, &weather, &breakdown);
    }

    Ok(())
}

fn init_sentry(settings: &congestiq_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
