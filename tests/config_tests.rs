use robogrid_app::domains::layout::OverwritePolicy;
use robogrid_app::Config;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"
[planner]
endpoint = "http://planner.local:5000/move_bots"
timeout_secs = 10
connect_timeout_secs = 2

[playback]
default_speed_ms = 400

[layout]
reclaim_on_overwrite = true

[logging]
file = "/tmp/robogrid-test.log"
level = "debug"

[scenario]
width = 3
height = 3
agents = 1
obstacles = ["B2"]
starts = ["A1"]
ends = ["C3"]
"#;

fn sample_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_from_file_reads_every_section() {
    let file = sample_file();
    let config = Config::from_file(file.path()).await.unwrap();

    assert_eq!(config.planner.endpoint, "http://planner.local:5000/move_bots");
    assert_eq!(config.playback.default_speed_ms, 400);
    assert_eq!(config.layout.overwrite_policy(), OverwritePolicy::Reclaim);
    assert_eq!(config.logging.level, "debug");

    let scenario = config.scenario.unwrap();
    assert_eq!((scenario.width, scenario.height, scenario.agents), (3, 3, 1));
    assert_eq!(scenario.starts, vec!["A1"]);
}

#[test]
fn test_load_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path().join("missing.toml")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.layout.overwrite_policy(), OverwritePolicy::Keep);
    assert!(config.scenario.is_none());
}

#[test]
fn test_load_layers_file_over_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"[playback]\ndefault_speed_ms = 250\n").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.playback.default_speed_ms, 250);
    assert_eq!(config.planner, Config::default().planner);
}

#[test]
fn test_from_file_rejects_missing_sections() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"[playback]\ndefault_speed_ms = 250\n").unwrap();

    let result = tokio_test::block_on(Config::from_file(file.path()));
    assert!(result.is_err());
}

#[test]
fn test_config_path_follows_environment() {
    std::env::remove_var("ROBOGRID_CONFIG");
    assert_eq!(Config::path_from_env(), "config.toml");

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    let path = file.path().to_string_lossy().to_string();
    std::env::set_var("ROBOGRID_CONFIG", &path);
    assert_eq!(Config::path_from_env(), path);

    let config = Config::load(Config::path_from_env()).unwrap();
    assert_eq!(config.playback.default_speed_ms, 400);
    std::env::remove_var("ROBOGRID_CONFIG");
}
