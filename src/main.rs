use anyhow::Result;
use csvconvert::{batch, config::Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout carries the progress lines, logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configure dirs ───────────────────────────────────────────
    let cfg = Config::default();
    info!(
        input = %cfg.input_dir.display(),
        json = %cfg.json_dir.display(),
        xml = %cfg.xml_dir.display(),
        "startup"
    );

    // ─── 3) convert ──────────────────────────────────────────────────
    batch::run(&cfg)?;
    Ok(())
}
