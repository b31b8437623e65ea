use syntax_rewriter::logging::init_logger;
use tracing::{debug, info};

#[test]
fn test_init_logger_is_reentrant() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("logs").join("rewrite.log");

    let first = init_logger(true, Some("debug"), Some(&log_file)).expect("first init");
    info!("logger installed");
    let second = init_logger(true, None, None).expect("second init is tolerated");
    debug!("still logging");

    drop(second);
    drop(first);
    assert!(log_file.exists(), "the log file and its directory are created");
}
