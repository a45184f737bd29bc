// Replays a trace JSON file without contacting a planner.
use robogrid_app::adapters::outbound::init_tracing_logger;
use robogrid_app::application::ReplayService;
use robogrid_app::domains::replay::{slider_to_speed, Trace};
use robogrid_app::Config;
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: replay_trace <trace.json> [slider 100-1900]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or(USAGE)?;
    let config = Config::load(Config::path_from_env())?;
    let speed_ms = match args.next() {
        Some(slider) => slider_to_speed(slider.parse()?),
        None => config.playback.default_speed_ms,
    };

    let content = tokio::fs::read_to_string(&path).await?;
    let trace: Trace = serde_json::from_str(&content)?;
    info!("Loaded trace {} with {} steps", path, trace.time_log.len());

    let replay = ReplayService::new(init_tracing_logger(), speed_ms);
    let mut session = replay.open_session(trace)?;
    replay
        .play_to_end(&mut session, |session, state| {
            println!("{}\n", session.render_step(state.current_step));
        })
        .await;

    println!("Movement Stats\n{}", session.stats());
    Ok(())
}
