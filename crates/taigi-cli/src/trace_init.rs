use std::fs;
use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "taigi_core=info,taigi_cli=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Without `trace_dir`, human-readable events go to stderr. With it, JSON
/// lines go to `<trace_dir>/dbtool-trace.jsonl`; keep the returned guard
/// alive until exit so buffered events are flushed.
pub fn init_tracing(trace_dir: Option<&Path>) -> Option<WorkerGuard> {
    let mut guard = None;
    INIT.call_once(|| {
        if let Some(dir) = trace_dir {
            match fs::create_dir_all(dir) {
                Ok(()) => {
                    let file_appender = tracing_appender::rolling::never(dir, "dbtool-trace.jsonl");
                    let (non_blocking, g) = tracing_appender::non_blocking(file_appender);
                    guard = Some(g);

                    tracing_subscriber::fmt()
                        .json()
                        .with_writer(non_blocking)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_env_filter(env_filter())
                        .init();
                    return;
                }
                Err(e) => eprintln!("Warning: cannot create {}: {e}", dir.display()),
            }
        }
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(env_filter())
            .init();
    });
    guard
}
