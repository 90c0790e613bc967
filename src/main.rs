use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser};
use log::{info, warn};

use drawpp::{
    Config, backend,
    cursor::Precision,
    draw::Canvas,
    scene::{self, DEFAULT_DEMO, Scene},
};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (git ", env!("DRAWPP_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "drawpp")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Draws primitive shapes and cursor animations in a Wayland window"
)]
struct Cli {
    /// Demo to show: shapes, cursor, polygons or a bundled script (see --list-demos)
    #[arg(long, value_name = "NAME", conflicts_with = "eval")]
    demo: Option<String>,

    /// Run an inline Draw++ program instead of a demo
    #[arg(long, value_name = "SOURCE")]
    eval: Option<String>,

    /// Truncate the cursor to integers after every move and rotation
    #[arg(long, action = ArgAction::SetTrue)]
    exact_drift: bool,

    /// Render without opening a window and print a summary
    #[arg(long, action = ArgAction::SetTrue)]
    headless: bool,

    /// List the available demos and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_demos: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.list_demos {
        for (name, summary) in scene::catalogue() {
            println!("{name:<10} {summary}");
        }
        return Ok(());
    }

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config: {:#}. Using defaults.", e);
            Config::default()
        }
    };

    if cli.exact_drift {
        config.cursor.precision = Precision::Truncate;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let scene = match cli.eval {
        Some(source) => Scene::inline(source),
        None => Scene::demo(cli.demo.as_deref().unwrap_or(DEFAULT_DEMO))?,
    };
    let scene = match config.choreography() {
        Some(choreography) => scene.with_choreography(choreography),
        None => scene,
    };
    let settings = config.render_settings();

    if cli.headless {
        let summary = scene.render_headless(&settings)?;
        for line in &summary.report.printed {
            println!("{line}");
        }
        print!("{summary}");
        return Ok(());
    }

    // Check for Wayland environment
    if std::env::var("WAYLAND_DISPLAY").is_err() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Use --headless to render without a display.");
        return Err(anyhow!("Wayland environment required"));
    }

    let mut canvas = Canvas::new(config.window.width, config.window.height, settings.background)
        .context("Failed to create canvas")?;
    let report = canvas
        .draw(settings.ink, |surface| scene.render(surface, &settings))
        .context("Failed to draw scene")??;

    for line in &report.printed {
        println!("{line}");
    }
    if let Some(cursor) = report.cursor {
        info!(
            "Cursor finished at {:?} heading ({:.2}, {:.2})",
            cursor.position(),
            cursor.dx,
            cursor.dy
        );
    }

    info!("Showing '{}'. Close the window or press Escape to exit.", scene.name());
    let title = format!("{} - {}", config.window.title, scene.name());
    backend::run_wayland(canvas, title, settings.background)
}
