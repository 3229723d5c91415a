use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{CustomType, InquireError, Select, Text, validator::Validation};
use std::{fmt, process::ExitCode, time::Duration};
use tracing::debug;
use weather_core::{CacheStore, Config, WeatherError, WeatherService};

use crate::{
    localization::{Labels, Locale},
    render::{CLEAR_SCREEN, render_report},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather from wttr.in, with a local cache")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// City name; asked interactively when neither this nor --auto is given.
    #[arg(short, long, conflicts_with = "auto")]
    pub city: Option<String>,

    /// Detect the location by IP without asking.
    #[arg(long)]
    pub auto: bool,

    /// Refresh continuously, every SECONDS (config default when omitted).
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        num_args = 0..=1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub watch: Option<Option<u64>>,

    /// Always hit the network and leave the cache untouched.
    #[arg(long)]
    pub no_cache: bool,

    /// Maximum age of cached data, in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub ttl: Option<u64>,

    /// Output language.
    #[arg(long, value_enum)]
    pub lang: Option<Locale>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set default TTL, watch interval and language interactively.
    Configure,

    /// Delete the cached weather data.
    ClearCache,
}

/// Per-invocation settings for fetching and printing.
#[derive(Debug, Clone, Copy)]
struct FetchOptions {
    use_cache: bool,
    ttl_secs: u64,
    locale: Locale,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let mut config = Config::load()?;
        debug!(?config, "configuration loaded");

        let locale = self.lang.unwrap_or_else(|| Locale::from_config(&config.locale));
        let labels = locale.labels();

        match self.command {
            Some(Command::ClearCache) => {
                CacheStore::new(config.cache_file.clone()).clear();
                println!("{}", labels.cache_cleared);
                return Ok(ExitCode::SUCCESS);
            }
            Some(Command::Configure) => {
                configure(&mut config)?;
                config.save()?;
                println!("{}", labels.config_saved);
                return Ok(ExitCode::SUCCESS);
            }
            None => {}
        }

        let service = WeatherService::from_config(&config)?;
        let opts = FetchOptions {
            use_cache: !self.no_cache,
            ttl_secs: self.ttl.unwrap_or(config.ttl_secs),
            locale,
        };

        let location = match (self.city, self.auto) {
            (Some(city), _) => Some(city),
            (None, true) => None,
            (None, false) => match prompt_location(labels)? {
                LocationChoice::City(city) => Some(city),
                LocationChoice::Auto => None,
                LocationChoice::Exit => {
                    println!("{}", labels.goodbye);
                    return Ok(ExitCode::SUCCESS);
                }
            },
        };

        match self.watch {
            Some(interval) => {
                let interval = interval.unwrap_or(config.watch_interval_secs).max(1);
                watch(&service, location.as_deref(), interval, opts).await
            }
            None => {
                let outcome = tokio::select! {
                    outcome = show(&service, location.as_deref(), opts, false) => Some(outcome),
                    _ = tokio::signal::ctrl_c() => None,
                };
                Ok(single_shot_exit(outcome, labels))
            }
        }
    }
}

/// Exit code for a one-off lookup; `None` means it was interrupted by Ctrl+C.
fn single_shot_exit(outcome: Option<Result<(), WeatherError>>, labels: &Labels) -> ExitCode {
    match outcome {
        Some(Ok(())) => ExitCode::SUCCESS,
        Some(Err(err)) => fail(&err, labels),
        None => {
            println!("\n{}", labels.goodbye);
            ExitCode::SUCCESS
        }
    }
}

/// Fetches once and prints the report.
async fn show(
    service: &WeatherService,
    location: Option<&str>,
    opts: FetchOptions,
    quiet: bool,
) -> Result<(), WeatherError> {
    let labels = opts.locale.labels();

    if !quiet && needs_network(service.cache(), location, opts) {
        println!("{}", labels.loading);
    }

    let report = service.get(location, opts.use_cache, opts.ttl_secs).await?;

    if report.from_cache && !quiet {
        println!("{}", labels.from_cache);
    }
    println!("{}", render_report(&report.record, opts.locale));

    Ok(())
}

/// Whether a lookup with `opts` will go to the provider rather than the cache.
fn needs_network(cache: &CacheStore, location: Option<&str>, opts: FetchOptions) -> bool {
    !opts.use_cache || cache.lookup(location, opts.ttl_secs).is_none()
}

/// Re-renders every `interval_secs` until Ctrl+C.
///
/// Each fetch-and-store cycle runs to completion or is dropped before it
/// touches the cache, so interrupting never leaves a partial write.
async fn watch(
    service: &WeatherService,
    location: Option<&str>,
    interval_secs: u64,
    opts: FetchOptions,
) -> anyhow::Result<ExitCode> {
    let labels = opts.locale.labels();
    println!("{} {interval_secs} {}", labels.watch_started, labels.seconds);
    println!("{}\n", labels.watch_hint);

    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        print!("{CLEAR_SCREEN}");
        println!("{}: {}\n", labels.updated_at, Local::now().format("%H:%M:%S"));

        let outcome = tokio::select! {
            outcome = show(service, location, opts, true) => outcome,
            _ = &mut interrupted => break,
        };

        if let Err(err) = outcome {
            return Ok(fail(&err, labels));
        }

        println!("\n{} {interval_secs} {}...", labels.next_update, labels.seconds);

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval_secs)) => {}
            _ = &mut interrupted => break,
        }
    }

    println!("\n\n{}", labels.watch_goodbye);
    Ok(ExitCode::SUCCESS)
}

fn fail(err: &WeatherError, labels: &Labels) -> ExitCode {
    eprintln!("❌ {}: {err}", labels.error);
    ExitCode::from(err.exit_code())
}

#[derive(Debug, PartialEq, Eq)]
enum LocationChoice {
    City(String),
    Auto,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    EnterCity,
    AutoDetect,
    Exit,
}

/// A menu entry paired with its localized label.
#[derive(Debug, Clone, Copy)]
struct MenuOption {
    item: MenuItem,
    label: &'static str,
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

fn menu(labels: &'static Labels) -> Vec<MenuOption> {
    vec![
        MenuOption { item: MenuItem::EnterCity, label: labels.menu_enter_city },
        MenuOption { item: MenuItem::AutoDetect, label: labels.menu_auto_detect },
        MenuOption { item: MenuItem::Exit, label: labels.menu_exit },
    ]
}

/// Asks for a city name, IP auto-detection, or exit.
fn prompt_location(labels: &'static Labels) -> anyhow::Result<LocationChoice> {
    let picked = match Select::new(labels.menu_prompt, menu(labels)).prompt() {
        Ok(option) => option.item,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(LocationChoice::Exit);
        }
        Err(e) => return Err(e).context("Failed to read location choice"),
    };

    match picked {
        MenuItem::AutoDetect => Ok(LocationChoice::Auto),
        MenuItem::Exit => Ok(LocationChoice::Exit),
        MenuItem::EnterCity => {
            let empty = labels.city_empty;
            let city = Text::new(labels.city_prompt)
                .with_validator(move |input: &str| {
                    if input.trim().is_empty() {
                        Ok(Validation::Invalid(empty.into()))
                    } else {
                        Ok(Validation::Valid)
                    }
                })
                .prompt();

            match city {
                Ok(city) => Ok(LocationChoice::City(city.trim().to_string())),
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    Ok(LocationChoice::Exit)
                }
                Err(e) => Err(e).context("Failed to read city name"),
            }
        }
    }
}

/// Prompts for the persisted defaults, starting from the current values.
fn configure(config: &mut Config) -> anyhow::Result<()> {
    config.ttl_secs = CustomType::<u64>::new("Cache TTL (seconds):")
        .with_default(config.ttl_secs)
        .prompt()
        .context("Failed to read cache TTL")?;

    config.watch_interval_secs = CustomType::<u64>::new("Watch interval (seconds):")
        .with_default(config.watch_interval_secs)
        .with_validator(|secs: &u64| {
            Ok(if *secs == 0 {
                Validation::Invalid("Interval must be at least one second".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()
        .context("Failed to read watch interval")?;

    let locales: Vec<&'static str> = Locale::value_variants().iter().map(Locale::as_str).collect();
    let current = Locale::from_config(&config.locale);
    let cursor = locales.iter().position(|l| *l == current.as_str()).unwrap_or(0);

    let locale = Select::new("Language:", locales)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read language")?;
    config.locale = locale.to_string();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use tempfile::TempDir;
    use weather_core::WeatherSnapshot;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn watch_flag_without_value_uses_config_interval() {
        let cli = Cli::try_parse_from(["weather", "--city", "Kyiv", "--watch"]).expect("parse");
        assert_eq!(cli.watch, Some(None));
        assert_eq!(cli.city.as_deref(), Some("Kyiv"));
    }

    #[test]
    fn watch_flag_accepts_interval() {
        let cli = Cli::try_parse_from(["weather", "-w", "60", "--auto"]).expect("parse");
        assert_eq!(cli.watch, Some(Some(60)));
        assert!(cli.auto);
    }

    #[test]
    fn zero_watch_interval_is_rejected() {
        assert!(Cli::try_parse_from(["weather", "--watch", "0"]).is_err());
    }

    #[test]
    fn city_and_auto_conflict() {
        assert!(Cli::try_parse_from(["weather", "--city", "Kyiv", "--auto"]).is_err());
    }

    #[test]
    fn cache_flags_and_language() {
        let cli = Cli::try_parse_from(["weather", "--no-cache", "--ttl", "600", "--lang", "en"])
            .expect("parse");
        assert!(cli.no_cache);
        assert_eq!(cli.ttl, Some(600));
        assert_eq!(cli.lang, Some(Locale::En));
        assert!(cli.watch.is_none());
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["weather", "clear-cache"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::ClearCache)));

        let cli = Cli::try_parse_from(["weather", "configure"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Configure)));
    }

    #[test]
    fn menu_lists_every_choice_once() {
        let items: Vec<_> = menu(Locale::En.labels()).iter().map(|o| o.item).collect();
        assert_eq!(items, vec![MenuItem::EnterCity, MenuItem::AutoDetect, MenuItem::Exit]);
    }

    fn opts(use_cache: bool, ttl_secs: u64) -> FetchOptions {
        FetchOptions { use_cache, ttl_secs, locale: Locale::En }
    }

    #[test]
    fn loading_notice_only_when_fetching() {
        let dir = TempDir::new().expect("tempdir");
        let cache = CacheStore::new(dir.path().join("weather.json"));

        assert!(needs_network(&cache, Some("Kyiv"), opts(true, 300)));

        cache.store(Some("Kyiv"), &WeatherSnapshot(json!({"current_condition": []})));

        assert!(!needs_network(&cache, Some("kyiv"), opts(true, 300)));
        assert!(needs_network(&cache, Some("Kyiv"), opts(false, 300)));
        assert!(needs_network(&cache, Some("Kyiv"), opts(true, 0)));
        assert!(needs_network(&cache, Some("Lviv"), opts(true, 300)));
    }

    #[test]
    fn interrupted_single_shot_exits_cleanly() {
        let labels = Locale::En.labels();

        assert_eq!(single_shot_exit(None, labels), ExitCode::SUCCESS);
        assert_eq!(single_shot_exit(Some(Ok(())), labels), ExitCode::SUCCESS);
        assert_eq!(
            single_shot_exit(Some(Err(WeatherError::http_status(500))), labels),
            ExitCode::from(7)
        );
    }
}
