//! Output formatting for human and JSON modes.

use rollcall::{Activity, Error, Outcome, Participant, Summary, Table};
use serde_json::{json, Map, Value};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Process exit status for an outcome.
pub fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Recorded(_) => 0,
        Outcome::Blocked(_) | Outcome::NotFound => 2,
        Outcome::PersistFailed(_) => 1,
    }
}

/// Result of one `process` call.
pub fn format_outcome(id: &str, activity: Activity, outcome: &Outcome, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => match outcome {
            Outcome::PersistFailed(_) => format!("(error) {}", outcome.message(activity)),
            _ => outcome.message(activity),
        },
        OutputMode::Json => {
            let mut body = json!({
                "id": id.trim(),
                "activity": activity.status_column(),
                "outcome": outcome.kind(),
                "message": outcome.message(activity),
            });
            match outcome {
                Outcome::Recorded(name) => body["name"] = json!(name),
                Outcome::Blocked(reason) => body["reason"] = json!(reason.as_str()),
                _ => {}
            }
            body.to_string()
        }
    }
}

/// One participant's record.
pub fn format_participant(p: &Participant, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => {
            let assigned = if p.assigned.is_unrestricted() {
                "any day".to_string()
            } else {
                p.assigned.tokens().join(", ")
            };
            let mut lines = vec![
                format!("{:<22}{}", "ID Code:", p.id),
                format!("{:<22}{}", "Name:", p.display_name()),
                format!("{:<22}{}", "Assigned Day:", assigned),
            ];
            for activity in Activity::ALL {
                let status = match (p.is_done(activity), p.timestamp(activity)) {
                    (true, Some(at)) => format!("Yes ({})", at),
                    (true, None) => "Yes".to_string(),
                    (false, _) => "No".to_string(),
                };
                lines.push(format!("{:<22}{}", format!("{}:", activity), status));
            }
            lines.join("\n")
        }
        OutputMode::Json => participant_json(p).to_string(),
    }
}

/// Lookup miss.
pub fn format_not_found(id: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => "No participant found with that ID code".to_string(),
        OutputMode::Json => json!({ "id": id.trim(), "outcome": "not_found" }).to_string(),
    }
}

/// Counts followed by one line per participant.
pub fn format_dashboard(summary: &Summary, table: &Table, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => {
            let mut out = format!("Participants: {}\n\n", summary.participants);
            let counts = Activity::ALL
                .into_iter()
                .map(|a| {
                    vec![
                        a.status_column().to_string(),
                        format!("{}/{}", summary.count(a), summary.participants),
                    ]
                })
                .collect();
            out.push_str(&render_grid(vec!["Activity".into(), "Done".into()], counts));
            out.push('\n');

            let mut headers = vec!["ID Code".to_string(), "Name".to_string()];
            headers.extend(Activity::ALL.into_iter().map(|a| a.alias().to_string()));
            let rows = table
                .participants()
                .map(|p| {
                    let mut row = vec![p.id.clone(), p.display_name().to_string()];
                    row.extend(
                        Activity::ALL
                            .into_iter()
                            .map(|a| (if p.is_done(a) { "Yes" } else { "-" }).to_string()),
                    );
                    row
                })
                .collect();
            out.push_str(&render_grid(headers, rows));
            out
        }
        OutputMode::Json => {
            let done: Map<String, Value> = Activity::ALL
                .into_iter()
                .map(|a| (a.status_column().to_string(), json!(summary.count(a))))
                .collect();
            json!({
                "participants": summary.participants,
                "done": done,
                "rows": table.participants().map(|p| participant_json(&p)).collect::<Vec<_>>(),
            })
            .to_string()
        }
    }
}

/// An error, Redis-style in human mode.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format!("(error) {}", err),
        OutputMode::Json => json!({ "error": err.to_string() }).to_string(),
    }
}

fn participant_json(p: &Participant) -> Value {
    let activities: Map<String, Value> = Activity::ALL
        .into_iter()
        .map(|a| {
            (
                a.status_column().to_string(),
                json!({ "done": p.is_done(a), "timestamp": p.timestamp(a) }),
            )
        })
        .collect();
    json!({
        "id": p.id,
        "name": p.display_name(),
        "assigned": p.assigned.tokens(),
        "activities": activities,
    })
}

/// Left-aligned columns separated by two spaces.
fn render_grid(headers: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = line(&headers);
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}
