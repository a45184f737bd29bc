use robogrid_app::adapters::outbound::{init_combined_logger, HttpPlannerClient};
use robogrid_app::application::{LayoutService, ReplayService};
use robogrid_app::config::ScenarioConfig;
use robogrid_app::domains::layout::MarkerKind;
use robogrid_app::Config;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Authors the configured scenario the way an operator would: obstacles, then starts, then ends.
async fn author_scenario(service: &LayoutService, scenario: &ScenarioConfig) {
    let placements = [
        (MarkerKind::Obstacle, &scenario.obstacles),
        (MarkerKind::Start, &scenario.starts),
        (MarkerKind::End, &scenario.ends),
    ];
    for (kind, coordinates) in placements {
        for coordinate in coordinates {
            match service.place_marker(coordinate, kind).await {
                Ok(Some(label)) => info!("Placed {:?} {} at {}", kind, label, coordinate),
                Ok(None) => info!("Placed {:?} at {}", kind, coordinate),
                // Rejected placements leave the layout usable; keep going like the UI would.
                Err(e) => warn!("{}", e.user_alert()),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting robogrid");

    let config_path = Config::path_from_env();
    let config = Config::load(&config_path)?;
    info!("Configuration loaded from {}", config_path);
    info!("Planner endpoint: {}", config.planner.endpoint);

    let logger = init_combined_logger(&config.logging);

    let Some(scenario) = config.scenario.clone() else {
        error!("No [scenario] section in {}, nothing to plan", config_path);
        return Ok(());
    };

    let planner = Arc::new(HttpPlannerClient::new(&config.planner)?);
    let service = LayoutService::new(
        scenario.width,
        scenario.height,
        scenario.agents,
        config.layout.overwrite_policy(),
        planner,
        logger.clone(),
    )?;
    author_scenario(&service, &scenario).await;

    let projection = service.projection().await;
    info!(
        "Layout {}x{}: {} starts, {} ends, {} obstacles",
        projection.width,
        projection.height,
        projection.starts_placed,
        projection.ends_placed,
        projection.obstacles_placed
    );

    let trace = match service.submit().await {
        Ok(trace) => trace,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_alert());
            return Ok(());
        }
    };

    let replay = ReplayService::new(logger, config.playback.default_speed_ms);
    let mut session = replay.open_session(trace)?;

    tokio::select! {
        _ = replay.play_to_end(&mut session, |session, state| {
            println!("{}\n", session.render_step(state.current_step));
        }) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping replay");
        }
    }

    println!("Movement Stats\n{}", session.stats());
    info!("Shutting down robogrid");
    Ok(())
}
