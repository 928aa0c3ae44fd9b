use std::path::PathBuf;

use celestial_core::constants::RAD_TO_DEG;
use celestial_core::Location;
use celestial_projection::ProjectionKind;
use celestial_sky::{
    Collaborators, CoreConfig, FrameType, SkyCore, SolarSystemCatalog, StaticLocationResolver,
};
use celestial_time::{JulianDate, SystemTimeSource};
use clap::Parser;

#[derive(Parser)]
#[command(name = "sky-tick")]
#[command(about = "Run the sky core headless and print where the view points each frame")]
struct Cli {
    /// JSON settings file (keys like "projection/type")
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value = "5")]
    ticks: usize,

    /// Seconds of real time per frame
    #[arg(long, default_value = "1.0")]
    dt: f64,

    /// Frame to report the view direction in (e.g. J2000, AltAz, Galactic)
    #[arg(long, default_value = "J2000")]
    frame: String,

    /// Projection key, overriding the settings file
    #[arg(long)]
    projection: Option<String>,

    /// Time rate in simulated days per real second
    #[arg(long)]
    rate: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CoreConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => CoreConfig::default(),
    };
    let frame = FrameType::from_key(&cli.frame)?;

    let greenwich = Location::new("Greenwich", "Earth", 0.0, 51.4769, 46.0)?
        .with_region(Some("United Kingdom"));
    let resolver = StaticLocationResolver::new(greenwich);

    let mut core = SkyCore::new(
        config,
        Box::new(SolarSystemCatalog::demo()),
        Box::new(SystemTimeSource::new(0.0)),
        Collaborators::headless(Box::new(resolver)),
    );
    core.init();
    if let Some(key) = &cli.projection {
        core.set_current_projection_type(ProjectionKind::from_key(key));
    }
    if let Some(rate) = cli.rate {
        core.set_time_rate(rate);
    }

    println!(
        "projection {} ({}), frame {}",
        core.current_projection_type_key(),
        core.current_projection_type().name(),
        frame
    );

    for tick in 0..cli.ticks {
        core.update(cli.dt)?;
        core.pre_draw();

        let center = core.model_view(frame).backward(-celestial_core::Vector3::z_axis());
        let (lon, lat) = center.to_spherical();
        let location = core.current_location()?;
        let utc = JulianDate::from_f64(core.jd()).to_calendar()?;
        println!(
            "{:4}: {} UTC  {}  view lon={:8.3}° lat={:+7.3}°  fov={:.2}°",
            tick,
            utc,
            location,
            lon * RAD_TO_DEG,
            lat * RAD_TO_DEG,
            core.projector_params().fov
        );

        core.post_draw();
    }

    Ok(())
}
