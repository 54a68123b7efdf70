use anyhow::{Context, bail};
use clubsite_content_engine::io;
use dioxus::prelude::*;
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

#[cfg(test)]
mod tests;

use clubsite_content_config::Config;
use ui::App;
use ui::components::ErrorScreen;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("clubsite-content starting up");

    let config = match resolve_config() {
        Ok(config) => config,
        Err(e) => {
            let program_name = env::args()
                .next()
                .unwrap_or_else(|| "clubsite-content".to_string());
            eprintln!("Error: {e:#}");
            eprintln!("Usage: {program_name} [articles-folder-path]");
            eprintln!(
                "Or create a config file at {}",
                Config::config_path().display()
            );
            process::exit(1);
        }
    };

    let config_path = Config::config_path();
    match config.save_if_missing(&config_path) {
        Ok(true) => log::info!("Remembered articles folder in {}", config_path.display()),
        Ok(false) => {}
        Err(e) => log::warn!("Could not write {}: {e:#}", config_path.display()),
    }

    log::info!("Articles: {}", config.articles_path.display());
    log::info!(
        "Media: {} served at {}",
        config.media_path.display(),
        config.media_url_prefix
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .launch(app_root);
}

/// Articles folder from the command line, otherwise the config file
fn resolve_config() -> anyhow::Result<Config> {
    let args: Vec<String> = env::args().collect();
    let (config, source) = match args.len() {
        2 => {
            let path = PathBuf::from(&args[1]);
            log::info!("Using articles path from CLI argument: {}", path.display());
            (Config::for_articles_dir(path), String::new())
        }
        1 => {
            let config_path = Config::config_path();
            log::info!("No CLI argument provided, checking {}", config_path.display());
            let Some(config) = Config::load().context("Failed to load config file")? else {
                bail!("No articles path provided and no config file found");
            };
            (
                config,
                format!(" from config file '{}'", config_path.display()),
            )
        }
        _ => bail!("Too many arguments"),
    };

    io::validate_articles_dir(&config.articles_path).with_context(|| {
        format!(
            "Articles path '{}'{source} is invalid",
            config.articles_path.display()
        )
    })?;

    Ok(config)
}

fn app_root() -> Element {
    match resolve_config() {
        Ok(config) => rsx! {
            App { config }
        },
        Err(e) => {
            log::error!("Cannot start: {e:#}");
            rsx! {
                ErrorScreen {
                    title: "Cannot open articles".to_string(),
                    message: "The articles folder could not be opened.".to_string(),
                    details: Some(format!("{e:#}")),
                }
            }
        }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("clubsite-content")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
