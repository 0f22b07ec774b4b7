use anyhow::{bail, Result};
use dashboard_service::{
    config::AppConfig,
    export::write_summary_csv,
    observability,
    pipeline::{render, RenderRequest},
};
use std::{env, io};

fn main() -> Result<()> {
    observability::init_tracing();

    let mut csv = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--csv" => csv = true,
            _ => positional.push(arg),
        }
    }
    if positional.is_empty() || positional.len() > 2 {
        bail!("usage: render_snapshot <monthly|quarterly|yearly> [line] [--csv]");
    }

    // Load configuration (DASHBOARD_CONFIG may point at an alternate dataset).
    let cfg = AppConfig::load()?;

    let request =
        RenderRequest::parse(Some(&positional[0]), positional.get(1).map(String::as_str))?;
    let out = render(&cfg.dataset, &request);

    let stdout = io::stdout();
    if csv {
        write_summary_csv(stdout.lock(), &out.view.summary)?;
    } else {
        serde_json::to_writer_pretty(stdout.lock(), &out.view)?;
        println!();
    }

    tracing::info!(fingerprint = %out.fingerprint, "snapshot written");
    Ok(())
}
