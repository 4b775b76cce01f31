use std::io::Write;

use chrono::Utc;
use colored::{Color, Colorize as _};
use env_logger::{Builder, Env};
use log::{Level, LevelFilter};

/// Installs the global logger. `RUST_LOG` wins over `verbosity`.
pub fn init(verbosity: u8, quiet: bool) {
    let default_level = default_level(verbosity, quiet);
    let env = Env::default().default_filter_or(default_level.as_str());

    Builder::from_env(env)
        .format(|f, record| {
            let time = Utc::now().format("%H:%M:%S").to_string().dimmed();
            let level = record.level();
            let tag = level.as_str()[..1].color(color_by_level(level)).bold();
            let target = record.target().dimmed();
            let message = record.args().to_string();
            let message = if level <= Level::Warn {
                message.color(color_by_level(level))
            } else {
                message.normal()
            };

            writeln!(f, "{time} [{tag}@{target}] {message}")
        })
        .init();
}

fn default_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbosity {
        0 if cfg!(debug_assertions) => LevelFilter::Debug,
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

const fn color_by_level(level: Level) -> Color {
    match level {
        Level::Trace => Color::Magenta,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}
