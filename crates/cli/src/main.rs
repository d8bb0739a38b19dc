//! Rollcall CLI: check-in desk for the shared participant table.
//!
//! Two modes:
//! - **Shell mode**: `rollcall [flags] COMMAND`, one command then exit
//! - **Desk mode**: `rollcall desk`, interactive prompt on a terminal, or
//!   one line per prompt when stdin is piped

mod commands;
mod desk;
mod format;
mod parse;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;

use rollcall::{Config, Error, Tracker};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::build_cli;
use desk::{run_desk, run_pipe, Desk};
use format::{
    exit_code, format_dashboard, format_error, format_not_found, format_outcome,
    format_participant, OutputMode,
};
use parse::{matches_to_action, CliAction};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "rollcall.toml";

fn main() {
    let cli = build_cli();
    let matches = cli.get_matches();

    init_tracing(matches.get_flag("verbose"));

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    };

    let tracker = match load_config(&matches).and_then(|config| Tracker::from_config(&config)) {
        Ok(tracker) => tracker,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };
    debug!(store = %tracker.describe(), "using table");

    process::exit(run_action(&tracker, action, output_mode));
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(matches: &clap::ArgMatches) -> rollcall::Result<Config> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG)?,
        None => Config::default(),
    };
    config.apply_env()?;
    if let Some(local) = matches.get_one::<String>("local") {
        config.store.local = Some(local.into());
    }
    Ok(config)
}

fn run_action(tracker: &Tracker, action: CliAction, mode: OutputMode) -> i32 {
    match action {
        CliAction::Process { id, activity } => {
            let outcome = tracker.process(&id, activity);
            let text = format_outcome(&id, activity, &outcome, mode);
            let code = exit_code(&outcome);
            if code == 1 {
                eprintln!("{}", text);
            } else {
                println!("{}", text);
            }
            code
        }
        CliAction::Lookup { id } => match tracker.lookup(&id) {
            Ok(Some(participant)) => {
                println!("{}", format_participant(&participant, mode));
                0
            }
            Ok(None) => {
                println!("{}", format_not_found(&id, mode));
                2
            }
            Err(e) => fail(&e, mode),
        },
        CliAction::Dashboard => {
            let shown = tracker
                .snapshot()
                .map(|table| format_dashboard(&rollcall::Summary::of(&table), &table, mode));
            match shown {
                Ok(text) => {
                    print!("{}", text);
                    0
                }
                Err(e) => fail(&e, mode),
            }
        }
        CliAction::Export { output } => {
            let written = tracker.export_csv().and_then(|csv| match &output {
                Some(path) => fs::write(path, csv).map_err(Error::from),
                None => {
                    print!("{}", csv);
                    Ok(())
                }
            });
            match written {
                Ok(()) => 0,
                Err(e) => fail(&e, mode),
            }
        }
        CliAction::Desk { activity } => {
            let mut desk = Desk::new(tracker, activity, mode);
            if io::stdin().is_terminal() {
                run_desk(&mut desk)
            } else {
                run_pipe(&mut desk, io::stdin().lock(), io::stdout().lock())
            }
        }
    }
}

fn fail(err: &Error, mode: OutputMode) -> i32 {
    eprintln!("{}", format_error(err, mode));
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "ID Code,Name,Bus Check-in\nA100,Ada Lovelace,No\n";

    #[test]
    fn test_local_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("rollcall.toml");
        fs::write(
            &config_path,
            "[store]\nrepo = \"acme/summit\"\n\n[retry]\nmax_attempts = 4\n",
        )
        .unwrap();

        let matches = build_cli()
            .try_get_matches_from([
                "rollcall",
                "--config",
                config_path.to_str().unwrap(),
                "dashboard",
                "--local",
                "seed.csv",
            ])
            .unwrap();
        let config = load_config(&matches).unwrap();

        assert_eq!(config.store.local.as_deref(), Some(Path::new("seed.csv")));
        assert_eq!(config.retry.max_attempts, 4);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let matches = build_cli()
            .try_get_matches_from(["rollcall", "-c", missing.to_str().unwrap(), "dashboard"])
            .unwrap();
        assert!(matches!(load_config(&matches), Err(Error::Config(_))));
    }

    #[test]
    fn test_process_against_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("checkins.csv");
        fs::write(&table, SEED).unwrap();
        let mut config = Config::default();
        config.store.local = Some(table.clone());
        let tracker = Tracker::from_config(&config).unwrap();

        let action = CliAction::Process {
            id: "a100".into(),
            activity: rollcall::Activity::Bus,
        };
        assert_eq!(run_action(&tracker, action, OutputMode::Human), 0);

        let again = CliAction::Process {
            id: "A100".into(),
            activity: rollcall::Activity::Bus,
        };
        assert_eq!(run_action(&tracker, again, OutputMode::Human), 2);
        assert!(fs::read_to_string(&table).unwrap().contains("A100,Ada Lovelace,Yes,"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export.csv");
        let tracker = Tracker::in_memory(SEED).unwrap();

        let code = run_action(
            &tracker,
            CliAction::Export {
                output: Some(out.clone()),
            },
            OutputMode::Human,
        );

        assert_eq!(code, 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), SEED);
    }

    #[test]
    fn test_lookup_miss_exit_code() {
        let tracker = Tracker::in_memory(SEED).unwrap();
        let code = run_action(
            &tracker,
            CliAction::Lookup { id: "Z999".into() },
            OutputMode::Json,
        );
        assert_eq!(code, 2);
    }
}
