use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use gputop::app::App;
use gputop::config::{self, load_config, load_config_from_path};
use gputop::event::{Event, EventHandler};
use gputop::gpu::collector::Collector;
use gputop::{trace, ui};

#[derive(Parser)]
#[command(name = "gputop", about = "TUI monitor for NVIDIA GPUs via nvidia-smi")]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Path to the nvidia-smi binary
    #[arg(long)]
    smi_path: Option<String>,

    /// Theme: dark, light, vivid, colorblind
    #[arg(long)]
    theme: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Print one snapshot and exit instead of starting the TUI
    #[arg(long, default_value_t = false)]
    once: bool,

    /// With --once, print the snapshot as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        trace::init_file_logging(path)?;
    }
    let config = load_config_for_cli(&cli);

    if cli.once {
        return run_once(&config, cli.json);
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(app.poll_interval());

    app.refresh_data();
    events.set_tick_rate(app.poll_interval());
    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        if let Some(event) = events.next().await {
            let mut should_draw = false;
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                        should_draw = true;
                    }
                }
                Event::Tick => {
                    app.refresh_data();
                    should_draw = true;
                }
                Event::Resize => {
                    should_draw = true;
                }
            }
            // Poll failures shift the loop onto the slower retry cadence;
            // recovery shifts it back.
            events.set_tick_rate(app.poll_interval());
            if should_draw {
                terminal.draw(|frame| ui::draw(frame, &app))?;
            }
        }
    }

    Ok(())
}

/// Single non-interactive poll for scripting. Errors go to the exit code
/// instead of the degrade-in-place path the TUI uses.
fn run_once(config: &config::Config, json: bool) -> Result<()> {
    let collector = Collector::new(config.general.smi_path.clone());
    let name = collector
        .device_name()
        .unwrap_or_else(|_| "Unknown".to_string());
    let snapshot = collector.poll()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{name}");
    println!(
        "  Utilization: {:.0}%  Memory: {}  Temp: {}C  Power: {}",
        snapshot.metrics.utilization,
        gputop::format::format_memory(
            snapshot.metrics.memory_used_mb,
            snapshot.metrics.memory_total_mb
        ),
        snapshot.metrics.temperature_c,
        gputop::format::format_power(
            snapshot.metrics.power_draw_w,
            snapshot.metrics.power_limit_w
        ),
    );
    for p in &snapshot.processes {
        println!(
            "  {:>8}  {}  {}",
            p.pid,
            p.name,
            gputop::format::format_mb(p.memory_mb)
        );
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref path) = cli.smi_path {
        config.general.smi_path = path.clone();
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }
    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }

    config
}
