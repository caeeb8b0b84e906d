use arena_logger::{LevelFilter, LogFormat, Logger};

#[test]
fn console_only_logger_has_no_file_output() {
    let logger = Logger::builder()
        .name("arena-console-only")
        .format(LogFormat::Json)
        .ansi(false)
        .level(LevelFilter::WARN)
        .init()
        .expect("logger should initialize");

    assert!(!logger.has_file_output());
}
