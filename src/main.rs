//! loan-dashboard - A terminal dashboard for a loan portfolio
//!
//! KPI tiles, status and state charts, and a sortable, filterable table of
//! high-value customers. Built on the ratatui Component Architecture.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io::Write;

fn main() -> Result<()> {
    let config = Config::load();
    init_logging(&config);

    if !Config::exists() {
        if let Err(e) = config.save() {
            log::warn!("could not write default config: {}", e);
        }
    }

    let mut tui = Tui::new(config.tick_rate())?;
    tui.enter()?;

    let mut app = App::new(config);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    app.shutdown();
    tui.exit()?;

    if let Err(err) = result {
        log::error!("fatal: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    log::info!("bye");
    Ok(())
}

/// Send log records to a file; stderr would tear the alternate screen.
/// RUST_LOG overrides the configured level.
fn init_logging(config: &Config) {
    let Some(path) = config.log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().append(true).create(true).open(&path) else {
        return;
    };

    let level = config.log_level.parse().unwrap_or(LevelFilter::Info);
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)));
    let _ = builder.try_init();
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                log::error!("draw error: {}", e);
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No input within the tick rate
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
