use wardrobe_core::config::{DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
use wardrobe_core::{logging_status, open_wardrobe, WardrobeConfig};

// Single test: this binary owns the process environment and the global logger.
#[test]
fn environment_config_drives_logging_and_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("wardrobe.sqlite3");
    let log_dir = dir.path().join("logs");
    std::env::set_var(DB_PATH_ENV, &db_path);
    std::env::set_var(LOG_DIR_ENV, &log_dir);
    std::env::set_var(LOG_LEVEL_ENV, " Debug ");

    let config = WardrobeConfig::from_env();
    assert_eq!(config.db_path, db_path);
    assert_eq!(config.log_dir, log_dir);
    assert_eq!(config.log_level, "Debug");

    config.init_logging().unwrap();
    config.init_logging().unwrap();
    let (level, active_dir) = logging_status().unwrap();
    assert_eq!(level, "debug");
    assert_eq!(active_dir, log_dir);
    assert!(log_dir.is_dir());

    let conflicting = WardrobeConfig {
        log_level: "error".to_string(),
        ..config.clone()
    };
    assert!(conflicting.init_logging().is_err());

    let state = open_wardrobe(&config).unwrap();
    assert_eq!(state.clothing_items().len(), 10);
    assert!(db_path.exists());
}
