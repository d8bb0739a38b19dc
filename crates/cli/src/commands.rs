//! Clap command tree.

use clap::{Arg, ArgAction, Command};

/// Build the `rollcall` command.
pub fn build_cli() -> Command {
    Command::new("rollcall")
        .about("Event check-in desk over a shared participant table")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .global(true)
                .help("TOML configuration file (default: ./rollcall.toml if present)"),
        )
        .arg(
            Arg::new("local")
                .long("local")
                .value_name("FILE")
                .global(true)
                .help("Use a local CSV file instead of the remote table"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print results as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log store and engine activity to stderr"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("process")
                .about("Record an activity for a participant")
                .arg(Arg::new("id").required(true).help("Participant ID code"))
                .arg(
                    Arg::new("activity")
                        .required(true)
                        .help("bus, food, conference, return or override"),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Show one participant")
                .arg(Arg::new("id").required(true).help("Participant ID code")),
        )
        .subcommand(Command::new("dashboard").about("Show counts and the participant table"))
        .subcommand(
            Command::new("export")
                .about("Write the table as CSV")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("FILE")
                        .help("Destination file (default: stdout)"),
                ),
        )
        .subcommand(
            Command::new("desk")
                .about("Interactive check-in desk")
                .arg(
                    Arg::new("activity")
                        .long("activity")
                        .short('a')
                        .value_name("ACTIVITY")
                        .help("Record this activity for every ID scanned"),
                ),
        )
}
