use std::env;

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `--debug` asks for logs.
const DEFAULT_FILTER: &str = "off";

fn filter_directive(debug: bool, rust_log: Option<String>) -> String {
    match rust_log {
        Some(directive) if !directive.is_empty() => directive,
        _ if debug => "debug".to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Installs the stderr subscriber. Calling it twice is harmless.
pub fn init(debug: bool) {
    let directive = filter_directive(debug, env::var("RUST_LOG").ok());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_by_default() {
        assert_eq!(filter_directive(false, None), "off");
        assert_eq!(filter_directive(false, Some(String::new())), "off");
    }

    #[test]
    fn test_debug_flag() {
        assert_eq!(filter_directive(true, None), "debug");
    }

    #[test]
    fn test_rust_log_wins() {
        assert_eq!(filter_directive(true, Some("trace".into())), "trace");
        assert_eq!(filter_directive(false, Some("warn".into())), "warn");
    }
}
