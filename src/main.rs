use std::io::{self, BufRead, Write};

use serde_json::json;
use trackerd::config::TrackerConfig;
use trackerd::ipc;

const LOG_ENV: &str = "TRACKERD_LOG";

fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    // stdout carries responses; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn write_frame(out: &mut impl Write, frame: &str) -> io::Result<()> {
    writeln!(out, "{}", frame)?;
    out.flush()
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = match TrackerConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "invalid configuration");
            return Err(e);
        }
    };
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        top_performers = config.top_performers,
        notices = config.notices.enabled,
        "trackerd ready"
    );

    let mut state = ipc::AppState::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let frame = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => {
                let resp = ipc::handle_request(&mut state, req);
                serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
            }
            Err(e) => {
                // No id to answer with.
                tracing::warn!(error = %e, "unparseable request line");
                json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                })
                .to_string()
            }
        };

        if let Err(e) = write_frame(&mut stdout, &frame) {
            tracing::warn!(error = %e, "stdout closed");
            break;
        }
    }

    tracing::info!("trackerd exiting");
    Ok(())
}
