//! Terminal host for the home tab.
//!
//! `RUST_LOG=debug` shows ticks.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use therawin_core::{Clock, FileStore, SystemClock};
use therawin_home::checkin::CheckinState;
use therawin_home::landscape::LandscapeState;
use therawin_home::{HomeConfig, HomeTab, Mood};

#[derive(Parser, Debug)]
#[command(name = "therawin-home")]
#[command(about = "Therawin home tab: landscape banner and mood check-in", long_about = None)]
struct Cli {
    /// Check in with this mood (1 = could be better .. 4 = fantastic)
    #[arg(long, value_parser = parse_mood)]
    mood: Option<Mood>,

    /// Step the banner's time-of-day toggle this many times
    #[arg(long, default_value_t = 0)]
    cycle: usize,

    /// Keep the timers running for this many seconds, then print again
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,

    /// JSON config file
    #[arg(long, env = "THERAWIN_CONFIG")]
    config: Option<PathBuf>,

    /// Store file holding the last check-in
    #[arg(long, env = "THERAWIN_STORE", default_value = "therawin-home.json")]
    store: PathBuf,
}

fn parse_mood(s: &str) -> Result<Mood, String> {
    let n: i64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    Mood::new(n).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HomeConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HomeConfig::default(),
    };
    let store = FileStore::new(cli.store);
    log::info!("store: {}", store.path().display());

    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let home = HomeTab::mount(config, clock, Rc::new(store));

    let subscriptions = [
        home.landscape().state().subscribe(|s: &LandscapeState| {
            log::info!("landscape: {} ({})", s.classification.period, s.mode);
        }),
        home.checkin().state().subscribe(|s: &CheckinState| {
            log::info!(
                "check-in: open={} remaining={:?} feedback={}",
                s.cooldown.can_check_in,
                s.cooldown.minutes_remaining,
                s.feedback
            );
        }),
    ];

    for _ in 0..cli.cycle {
        home.landscape().cycle();
    }
    if let Some(mood) = cli.mood {
        if home.checkin().submit(mood).is_none() {
            println!("Check-in locked; try again later.");
        }
    }

    println!("{}", home.snapshot());

    if let Some(secs) = cli.watch {
        home.events().run_for(Duration::from_secs(secs));
        println!("{}", home.snapshot());
    } else {
        // Let the simulated save and feedback window finish.
        home.events().run_for(Duration::from_millis(2_100));
    }

    for unsubscribe in subscriptions {
        unsubscribe.run();
    }
    home.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["therawin-home", "--mood", "3", "--cycle", "2", "--watch", "5"]).unwrap();
        assert_eq!(cli.mood, Some(Mood::GOOD));
        assert_eq!(cli.cycle, 2);
        assert_eq!(cli.watch, Some(5));
    }

    #[test]
    fn rejects_out_of_range_mood() {
        assert!(Cli::try_parse_from(["therawin-home", "--mood", "5"]).is_err());
        assert!(Cli::try_parse_from(["therawin-home", "--mood", "good"]).is_err());
    }

    #[test]
    fn help_prints_usage() {
        let err = Cli::try_parse_from(["therawin-home", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
