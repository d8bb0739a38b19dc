//! ArgMatches and desk input → actions.
//!
//! Translates clap's parsed arguments into a `CliAction`, and recognises the
//! few words the desk prompt treats specially.

use clap::ArgMatches;
use rollcall::Activity;
use std::path::PathBuf;

/// The result of parsing the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    /// Record one activity.
    Process { id: String, activity: Activity },
    /// Show one participant.
    Lookup { id: String },
    /// Counts plus the participant table.
    Dashboard,
    /// CSV to a file or stdout.
    Export { output: Option<PathBuf> },
    /// Interactive desk, optionally fixed to one activity.
    Desk { activity: Option<Activity> },
}

/// Desk meta-commands.
#[derive(Debug, PartialEq, Eq)]
pub enum MetaCommand {
    Quit,
    Help,
}

/// Check for desk meta-commands before treating the line as input.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    match line.trim().to_lowercase().as_str() {
        "quit" | "exit" | "q" => Some(MetaCommand::Quit),
        "help" | "?" => Some(MetaCommand::Help),
        _ => None,
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "process" => Ok(CliAction::Process {
            id: required(sub_matches, "id")?,
            activity: parse_activity(&required(sub_matches, "activity")?)?,
        }),
        "lookup" => Ok(CliAction::Lookup {
            id: required(sub_matches, "id")?,
        }),
        "dashboard" => Ok(CliAction::Dashboard),
        "export" => Ok(CliAction::Export {
            output: sub_matches.get_one::<String>("output").map(PathBuf::from),
        }),
        "desk" => {
            let activity = match sub_matches.get_one::<String>("activity") {
                Some(raw) => Some(parse_activity(raw)?),
                None => None,
            };
            Ok(CliAction::Desk { activity })
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Parse an activity name, reporting the accepted names on failure.
pub fn parse_activity(raw: &str) -> Result<Activity, String> {
    raw.parse::<Activity>().map_err(|e| e.to_string())
}

fn required(matches: &ArgMatches, name: &str) -> Result<String, String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| format!("Missing argument: {}", name))
}
