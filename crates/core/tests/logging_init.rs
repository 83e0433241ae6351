use tempfile::TempDir;

#[test]
fn init_logging_writes_under_override_dir() {
    let temp = TempDir::new().unwrap();
    // SAFETY: single-threaded at this point; this test owns its own binary.
    unsafe { std::env::set_var("ALSCOPE_LOG_DIR", temp.path()) };

    let guard = alscope_core::logging::init_logging("core-test", false);
    tracing::info!("logging smoke test");
    drop(guard);

    let entries: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .collect();
    assert!(!entries.is_empty(), "expected a rolled log file");
}
