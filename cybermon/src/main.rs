//! Entry point for the cybermon dashboard. Parses args, starts the sampler
//! and runs the render loop.

mod app;
mod config;
mod ui;

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use app::App;
use config::{parse_positive, Settings};
use cybermon_sampler::{spawn_sampler, SamplingEngine, SysinfoSource, CPU_SETTLE};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct ParsedArgs {
    settings: Settings,
    help: bool,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--interval-ms MS|-i MS] [--fps N|-f N] [--proc-every TICKS|-n TICKS] [--disk PATH|-d PATH] [--log FILE] [--once]"
    )
}

fn parse_args<I: IntoIterator<Item = String>>(
    args: I,
    mut settings: Settings,
) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "cybermon".into());
    let mut help = false;

    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| it.next())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{name} needs a value. {}", usage(&prog)))
        };
        match flag.as_str() {
            "-h" | "--help" => help = true,
            "--interval-ms" | "-i" => {
                settings.interval_ms = parse_positive("--interval-ms", &value("--interval-ms")?)?;
            }
            "--fps" | "-f" => {
                settings.fps = parse_positive("--fps", &value("--fps")?)?;
            }
            "--proc-every" | "-n" => {
                settings.proc_every = parse_positive("--proc-every", &value("--proc-every")?)?;
            }
            "--disk" | "-d" => {
                settings.disk_path = PathBuf::from(value("--disk")?);
            }
            "--log" => {
                settings.log_file = Some(PathBuf::from(value("--log")?));
            }
            "--once" => settings.once = true,
            _ => {
                return Err(format!("Unexpected argument {arg:?}. {}", usage(&prog)));
            }
        }
    }
    Ok(ParsedArgs { settings, help })
}

/// Logs go to a file (the TUI owns the terminal) or, for `--once`, stderr.
fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = &settings.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if settings.once {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let prog = env::args().next().unwrap_or_else(|| "cybermon".into());
    let base = Settings::from_env().map_err(anyhow::Error::msg)?;
    let parsed = parse_args(env::args(), base).map_err(anyhow::Error::msg)?;
    if parsed.help {
        println!("{}", usage(&prog));
        return Ok(());
    }
    let settings = parsed.settings;
    init_logging(&settings)?;

    let source = SysinfoSource::new().context("starting system stats")?;
    let mut engine = SamplingEngine::new(source, settings.engine_config());

    if settings.once {
        // give the CPU counters a window to measure over
        tokio::time::sleep(CPU_SETTLE).await;
        let snap = engine.tick();
        println!("{}", serde_json::to_string_pretty(&snap)?);
        return Ok(());
    }

    info!(interval_ms = settings.interval_ms, fps = settings.fps, "starting dashboard");
    let (sampler, latest) = spawn_sampler(engine, settings.sample_interval());
    let mut app = App::new(settings.frame_interval(), settings.disk_path.display().to_string());
    let res = app.run(latest).await;
    sampler.abort();
    info!("dashboard closed");
    res
}
