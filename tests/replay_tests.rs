use rand::rngs::StdRng;
use rand::SeedableRng;
use robogrid_app::common::DomainError;
use robogrid_app::domains::replay::*;
use std::collections::BTreeMap;

fn positions(entries: &[(&str, Coord)]) -> BTreeMap<String, Coord> {
    entries.iter().map(|(id, c)| (id.to_string(), *c)).collect()
}

fn step(entries: &[(&str, Coord)], timestamp: &str) -> TimeStep {
    TimeStep {
        positions: positions(entries),
        timestamp: timestamp.to_string(),
    }
}

fn fixture_trace() -> Trace {
    serde_json::from_str(include_str!("fixtures/two_robots.json")).unwrap()
}

#[test]
fn test_reconstruct_draws_agents_over_obstacles() {
    let dimensions = GridDimensions { width: 3, height: 3 };
    let obstacles = [Coord(1, 1), Coord(0, 2)];
    let frame = reconstruct(dimensions, &obstacles, &positions(&[("A1", Coord(1, 1))]));

    assert_eq!(frame.symbol(1, 1), Some("A1"));
    assert_eq!(frame.symbol(0, 2), Some("X"));
    assert_eq!(frame.symbol(2, 2), Some("."));
    assert_eq!(frame.rows.len(), 3);
    assert!(frame.rows.iter().all(|row| row.len() == 3));
}

#[test]
fn test_reconstruct_ignores_obstacle_order() {
    let dimensions = GridDimensions { width: 4, height: 3 };
    let agents = positions(&[("A1", Coord(0, 0))]);
    let forward = reconstruct(dimensions, &[Coord(0, 0), Coord(2, 3), Coord(1, 2)], &agents);
    let reversed = reconstruct(dimensions, &[Coord(1, 2), Coord(2, 3), Coord(0, 0)], &agents);

    assert_eq!(forward, reversed);
    assert_eq!(forward.symbol(0, 0), Some("A1"));
}

#[test]
fn test_reconstruct_ignores_out_of_bounds_coordinates() {
    let dimensions = GridDimensions { width: 3, height: 3 };
    let obstacles = [Coord(3, 0), Coord(-1, 1)];
    let frame = reconstruct(
        dimensions,
        &obstacles,
        &positions(&[("A1", Coord(0, 3)), ("A2", Coord(-2, 0)), ("A3", Coord(2, 0))]),
    );

    let agents: Vec<_> = frame.rows.iter().flatten().filter(|s| Frame::is_agent(s)).collect();
    assert_eq!(agents, vec!["A3"]);
    assert!(frame.rows.iter().flatten().all(|s| s != "X"));
}

#[test]
fn test_sparse_trace_decodes() {
    let trace = fixture_trace();
    assert_eq!(trace.grid_dimensions, GridDimensions { width: 4, height: 3 });
    assert_eq!(trace.obstacles, vec![Coord(1, 1)]);
    assert_eq!(trace.time_log.len(), 4);
    assert_eq!(trace.last_step(), 3);
    assert_eq!(trace.time_log[2].positions["A2"], Coord(2, 2));
    assert_eq!(trace.movement_stats.as_ref().unwrap().max_movements, 3);
}

#[test]
fn test_dense_planner_frames_follow_moving_robots() {
    // Frames as the planner draws them: start labels stay on their start cells.
    let trace: Trace = serde_json::from_str(include_str!("fixtures/planner_dense.json")).unwrap();

    let a1: Vec<_> = trace.time_log.iter().map(|step| step.positions["A1"]).collect();
    assert_eq!(a1, vec![Coord(2, 2), Coord(1, 2), Coord(0, 2), Coord(0, 1), Coord(0, 0)]);
    let a2: Vec<_> = trace.time_log.iter().map(|step| step.positions["A2"]).collect();
    assert_eq!(a2, vec![Coord(1, 0), Coord(2, 0), Coord(2, 0), Coord(2, 0), Coord(2, 0)]);

    assert_eq!(trace.obstacles, vec![Coord(1, 1)]);
    assert_eq!(trace.time_log[4].timestamp, "4");
    assert!(stats::verify(&trace).is_empty());
    assert_eq!(stats::recompute(&trace.time_log).total_movements["A1"], 4);

    let last = reconstruct(trace.grid_dimensions, &trace.obstacles, &trace.time_log[4].positions);
    assert_eq!(last.symbol(0, 0), Some("A1"));
    assert_eq!(last.symbol(2, 2), Some("."));
}

#[test]
fn test_dense_frame_with_single_copy_uses_it() {
    let json = r#"{
        "grid_dimensions": { "width": 3, "height": 3 },
        "time_log": [
            { "grid": [[".", ".", "."], [".", ".", "."], [".", ".", "A1"]], "timestamp": "0" },
            { "grid": [[".", ".", "."], [".", ".", "A1"], [".", ".", "A1"]], "timestamp": "1" },
            { "grid": [[".", ".", "."], [".", ".", "."], [".", ".", "A1"]], "timestamp": "2" }
        ]
    }"#;
    let trace: Trace = serde_json::from_str(json).unwrap();

    assert!(trace.obstacles.is_empty());
    assert_eq!(trace.time_log[1].positions["A1"], Coord(1, 2));
    // Back on its start cell.
    assert_eq!(trace.time_log[2].positions["A1"], Coord(2, 2));
}

#[test]
fn test_oversized_trace_dimensions_rejected() {
    let json = r#"{
        "grid_dimensions": { "width": 1000000000000, "height": 3 },
        "time_log": [{ "positions": { "A1": [0, 0] }, "timestamp": "0" }]
    }"#;
    let err = serde_json::from_str::<Trace>(json).unwrap_err();
    assert!(err.to_string().contains("Invalid trace"));

    let mut trace = fixture_trace();
    trace.grid_dimensions = GridDimensions { width: MAX_TRACE_CELLS, height: 2 };
    assert!(matches!(
        ReplaySession::open(trace, DEFAULT_SPEED_MS),
        Err(DomainError::InvalidTrace { .. })
    ));
}

#[test]
fn test_missing_obstacles_default_to_empty() {
    let json = r#"{
        "grid_dimensions": { "width": 3, "height": 3 },
        "time_log": [{ "positions": { "A1": [0, 0] }, "timestamp": "t0" }]
    }"#;
    let trace: Trace = serde_json::from_str(json).unwrap();
    assert!(trace.obstacles.is_empty());
}

#[test]
fn test_palette_covers_agents_from_every_step() {
    let trace = Trace {
        grid_dimensions: GridDimensions { width: 3, height: 3 },
        obstacles: vec![],
        time_log: vec![
            step(&[("A1", Coord(0, 0))], "t0"),
            step(&[("A1", Coord(0, 1)), ("A2", Coord(2, 2))], "t1"),
        ],
        movement_stats: None,
    };
    let palette = RobotPalette::assign(trace.agent_ids(), &mut StdRng::seed_from_u64(7));

    assert_eq!(palette.len(), 2);
    assert!(palette.contains("A1"));
    assert!(palette.contains("A2"));
    assert_eq!(palette.color_of("ghost"), RobotColor::FALLBACK);
    assert_eq!(RobotColor::FALLBACK.to_string(), "#6B7280");
}

#[test]
fn test_palette_is_stable_within_session() {
    let session = ReplaySession::open_with_rng(fixture_trace(), 500, &mut StdRng::seed_from_u64(1)).unwrap();
    let first = session.palette().color_of("A1");
    for step in 0..=session.last_step() {
        let _ = session.render_step(step);
        assert_eq!(session.palette().color_of("A1"), first);
    }

    let same_seed = ReplaySession::open_with_rng(fixture_trace(), 500, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(same_seed.palette(), session.palette());
}

#[test]
fn test_render_paints_agents_only() {
    let dimensions = GridDimensions { width: 3, height: 3 };
    let frame = reconstruct(dimensions, &[Coord(1, 1)], &positions(&[("A1", Coord(0, 0))]));
    let palette = RobotPalette::assign(["A1"], &mut StdRng::seed_from_u64(3));

    let plain = frame.render(None);
    assert_eq!(plain, "A1  .  .\n .  X  .\n .  .  .");

    let painted = frame.render(Some(&palette));
    assert!(painted.contains(&palette.color_of("A1").paint("A1")));
    assert!(!painted.contains(&palette.color_of("A1").paint(" X")));
}

#[test]
fn test_recompute_counts_position_changes() {
    let trace = fixture_trace();
    let stats = stats::recompute(&trace.time_log);

    assert_eq!(stats.total_movements["A1"], 3);
    assert_eq!(stats.total_movements["A2"], 2);
    assert_eq!(stats.max_movements, 3);
    assert!((stats.average_movements - 2.5).abs() < f64::EPSILON);
}

#[test]
fn test_recompute_handles_agents_missing_from_steps() {
    let time_log = vec![
        step(&[("A1", Coord(0, 0))], "t0"),
        step(&[("A2", Coord(1, 1))], "t1"),
        step(&[("A1", Coord(0, 1)), ("A2", Coord(1, 2))], "t2"),
    ];
    let stats = stats::recompute(&time_log);
    assert_eq!(stats.total_movements["A1"], 0);
    assert_eq!(stats.total_movements["A2"], 1);

    let empty = stats::recompute(&[]);
    assert_eq!(empty.max_movements, 0);
    assert_eq!(empty.average_movements, 0.0);
}

#[test]
fn test_resolve_prefers_reported_stats() {
    let mut trace = fixture_trace();
    let reported = trace.movement_stats.clone().unwrap();
    assert_eq!(stats::resolve(&trace), reported);

    trace.movement_stats = None;
    assert_eq!(stats::resolve(&trace).total_movements["A1"], 3);
}

#[test]
fn test_verify_flags_disagreeing_totals() {
    let mut trace = fixture_trace();
    assert!(stats::verify(&trace).is_empty());

    if let Some(reported) = trace.movement_stats.as_mut() {
        reported.total_movements.insert("A1".to_string(), 9);
        reported.total_movements.remove("A2");
    }
    let discrepancies = stats::verify(&trace);
    assert_eq!(
        discrepancies,
        vec![
            StatsDiscrepancy { agent_id: "A1".to_string(), reported: Some(9), observed: 3 },
            StatsDiscrepancy { agent_id: "A2".to_string(), reported: None, observed: 2 },
        ]
    );
}

#[test]
fn test_stats_display() {
    let rendered = fixture_trace().movement_stats.unwrap().to_string();
    assert!(rendered.starts_with("Average Movements: 2.50\nMax Movements: 3\n"));
    assert!(rendered.contains("Robot A1: 3 movements"));
    assert!(rendered.contains("Robot A2: 2 movements"));
}

#[test]
fn test_empty_trace_cannot_open_session() {
    let trace = Trace {
        grid_dimensions: GridDimensions { width: 3, height: 3 },
        obstacles: vec![],
        time_log: vec![],
        movement_stats: None,
    };
    assert!(matches!(
        ReplaySession::open(trace, DEFAULT_SPEED_MS),
        Err(DomainError::InvalidTrace { .. })
    ));
}

#[test]
fn test_session_frames_and_labels() {
    let session = ReplaySession::open_with_rng(fixture_trace(), 500, &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(session.frame_at(0).symbol(0, 0), Some("A1"));
    assert_eq!(session.frame_at(3).symbol(1, 2), Some("A1"));
    // Past the end clamps to the last frame.
    assert_eq!(session.frame_at(99), session.frame_at(3));
    assert_eq!(session.current_frame(), session.frame_at(0));

    assert_eq!(session.timestamp_at(1), "2024-05-01 10:00:01");
    assert_eq!(session.timestamp_at(42), "No data");
    assert_eq!(session.progress_label(0), "Step: 1 / 4");
    assert_eq!(session.progress_label(10), "Step: 4 / 4");

    let block = session.render_step(3);
    assert!(block.ends_with("2024-05-01 10:00:03\nStep: 4 / 4"));
}
