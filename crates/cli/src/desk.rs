//! Interactive check-in desk.
//!
//! Staff scan or type an ID code, see who it is, then pick the activity.
//! With a fixed activity (`desk --activity bus`) every ID is recorded
//! straight away. `quit` or `exit` leaves; an empty line at the activity
//! prompt goes back to the ID prompt.

use std::io::{BufRead, Write};

use rollcall::{Activity, Outcome, Participant, Tracker};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::format::{format_error, format_not_found, format_outcome, format_participant, OutputMode};
use crate::parse::{check_meta_command, parse_activity, MetaCommand};

const HELP: &str = "\
Type an ID code, then an activity: bus, food, conference, return, override.
An empty activity goes back to the ID prompt. quit or exit leaves the desk.";

/// What the desk wants done after one line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Print this (may be empty) and read the next line.
    Output(String),
    /// Leave the desk.
    Quit,
}

/// State between prompts.
pub struct Desk<'a> {
    tracker: &'a Tracker,
    fixed: Option<Activity>,
    mode: OutputMode,
    pending: Option<Participant>,
    failures: usize,
}

impl<'a> Desk<'a> {
    pub fn new(tracker: &'a Tracker, fixed: Option<Activity>, mode: OutputMode) -> Self {
        Desk {
            tracker,
            fixed,
            mode,
            pending: None,
            failures: 0,
        }
    }

    /// Prompt for the next line.
    pub fn prompt(&self) -> String {
        match (&self.pending, self.fixed) {
            (Some(p), _) => format!("activity for {}> ", p.display_name()),
            (None, Some(activity)) => format!("{} ID> ", activity.alias()),
            (None, None) => "ID> ".to_string(),
        }
    }

    /// Check-ins that could not be saved so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Drop a half-entered check-in. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Handle one line of input.
    pub fn handle(&mut self, line: &str) -> Step {
        match check_meta_command(line) {
            Some(MetaCommand::Quit) => return Step::Quit,
            Some(MetaCommand::Help) => return Step::Output(HELP.to_string()),
            None => {}
        }

        let input = line.trim();
        match self.pending.take() {
            Some(_) if input.is_empty() => Step::Output(String::new()),
            Some(participant) => match parse_activity(input) {
                Ok(activity) => Step::Output(self.record(&participant.id, activity)),
                Err(e) => {
                    self.pending = Some(participant);
                    Step::Output(format!("(error) {}", e))
                }
            },
            None if input.is_empty() => Step::Output(String::new()),
            None => match self.fixed {
                Some(activity) => Step::Output(self.record(input, activity)),
                None => Step::Output(self.identify(input)),
            },
        }
    }

    fn identify(&mut self, id: &str) -> String {
        match self.tracker.lookup(id) {
            Ok(Some(participant)) => {
                let shown = format_participant(&participant, self.mode);
                self.pending = Some(participant);
                shown
            }
            Ok(None) => format_not_found(id, self.mode),
            Err(e) => format_error(&e, self.mode),
        }
    }

    fn record(&mut self, id: &str, activity: Activity) -> String {
        let outcome = self.tracker.process(id, activity);
        if matches!(outcome, Outcome::PersistFailed(_)) {
            self.failures += 1;
        }
        format_outcome(id, activity, &outcome, self.mode)
    }
}

/// Run the desk on a terminal.
pub fn run_desk(desk: &mut Desk<'_>) -> i32 {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("(error) {}", e);
            return 1;
        }
    };
    println!("{}", HELP);

    loop {
        match editor.readline(&desk.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match desk.handle(&line) {
                    Step::Output(text) if text.is_empty() => {}
                    Step::Output(text) => println!("{}", text),
                    Step::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if !desk.cancel() {
                    break;
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        }
    }
    0
}

/// Run the desk over piped input, one line per prompt.
///
/// Returns 1 if any check-in could not be saved.
pub fn run_pipe(desk: &mut Desk<'_>, input: impl BufRead, mut out: impl Write) -> i32 {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        };
        match desk.handle(&line) {
            Step::Output(text) if text.is_empty() => {}
            Step::Output(text) => {
                if writeln!(out, "{}", text).is_err() {
                    return 1;
                }
            }
            Step::Quit => break,
        }
    }
    i32::from(desk.failures() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rollcall::{FixedClock, MemoryBlob, RetryPolicy};
    use std::sync::Arc;

    const SEED: &str = "ID Code,Name,Assigned Day\nA100,Ada Lovelace,\nB200,Grace Hopper,\n";

    fn tracker() -> (Tracker, Arc<MemoryBlob>) {
        let blob = Arc::new(MemoryBlob::new(SEED));
        let day = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap();
        let tracker = Tracker::builder()
            .backend(blob.clone())
            .clock(Arc::new(FixedClock::at_day(day)))
            .retry(RetryPolicy::immediate(2))
            .open()
            .unwrap();
        (tracker, blob)
    }

    fn output(step: Step) -> String {
        match step {
            Step::Output(text) => text,
            Step::Quit => panic!("desk quit unexpectedly"),
        }
    }

    #[test]
    fn test_id_then_activity() {
        let (tracker, _) = tracker();
        let mut desk = Desk::new(&tracker, None, OutputMode::Human);
        assert_eq!(desk.prompt(), "ID> ");

        let shown = output(desk.handle("a100"));
        assert!(shown.contains("Ada Lovelace"));
        assert_eq!(desk.prompt(), "activity for Ada Lovelace> ");

        let recorded = output(desk.handle("food"));
        assert_eq!(recorded, "Food Collection recorded for Ada Lovelace");
        assert_eq!(desk.prompt(), "ID> ");
    }

    #[test]
    fn test_bad_activity_keeps_participant() {
        let (tracker, blob) = tracker();
        let mut desk = Desk::new(&tracker, None, OutputMode::Human);
        desk.handle("B200");

        let err = output(desk.handle("lunch"));

        assert!(err.starts_with("(error) unknown activity"));
        assert_eq!(desk.prompt(), "activity for Grace Hopper> ");
        assert_eq!(blob.put_attempts(), 0);
    }

    #[test]
    fn test_empty_activity_goes_back() {
        let (tracker, _) = tracker();
        let mut desk = Desk::new(&tracker, None, OutputMode::Human);
        desk.handle("B200");

        assert_eq!(desk.handle("  "), Step::Output(String::new()));
        assert_eq!(desk.prompt(), "ID> ");
    }

    #[test]
    fn test_unknown_id() {
        let (tracker, _) = tracker();
        let mut desk = Desk::new(&tracker, None, OutputMode::Human);
        assert_eq!(
            output(desk.handle("Z999")),
            "No participant found with that ID code"
        );
        assert_eq!(desk.prompt(), "ID> ");
    }

    #[test]
    fn test_fixed_activity_records_each_id() {
        let (tracker, blob) = tracker();
        let mut desk = Desk::new(&tracker, Some(Activity::Bus), OutputMode::Human);
        assert_eq!(desk.prompt(), "bus ID> ");

        assert_eq!(output(desk.handle("A100")), "Bus Check-in recorded for Ada Lovelace");
        assert_eq!(output(desk.handle("A100")), "Bus Check-in: already recorded");
        assert_eq!(blob.messages().len(), 1);
    }

    #[test]
    fn test_quit_and_exit() {
        let (tracker, _) = tracker();
        let mut desk = Desk::new(&tracker, None, OutputMode::Human);
        assert_eq!(desk.handle("exit"), Step::Quit);
        desk.handle("A100");
        assert_eq!(desk.handle("quit"), Step::Quit);
    }

    #[test]
    fn test_pipe_reports_failures() {
        let (tracker, blob) = tracker();
        let mut desk = Desk::new(&tracker, Some(Activity::Food), OutputMode::Human);
        blob.fail_all_puts(true);

        let mut out = Vec::new();
        let code = run_pipe(&mut desk, "A100\n\nquit\nB200\n".as_bytes(), &mut out);

        assert_eq!(code, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("(error) Failed to save:"), "{}", text);
        assert!(!text.contains("Grace"));
    }

    #[test]
    fn test_pipe_success() {
        let (tracker, _) = tracker();
        let mut desk = Desk::new(&tracker, None, OutputMode::Human);

        let mut out = Vec::new();
        let code = run_pipe(&mut desk, "B200\nconference\n".as_bytes(), &mut out);

        assert_eq!(code, 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Conference Check-in recorded for Grace Hopper\n"));
    }
}
