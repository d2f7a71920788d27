//! Colorful console output for engine events.
//!
//! Provides a custom `tracing` layer that formats score engine events with
//! colors. Enabled with the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the console layer as the global subscriber.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// is honored; engine events default to `info`, so set
/// `RUST_LOG=rota_scoring=trace` to see every move.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "rota_scoring=info".parse() {
            filter = filter.add_directive(directive);
        }

        // Another global subscriber wins; nothing to report then.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(EngineConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats score engine events with colors.
pub struct EngineConsoleLayer;

impl<S: Subscriber> Layer<S> for EngineConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("rota_scoring") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_engine_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    shift: Option<String>,
    employee: Option<String>,
    from: Option<String>,
    to: Option<String>,
    score: Option<String>,
    employee_count: Option<u64>,
    shift_count: Option<u64>,
    assigned_count: Option<u64>,
    availability_count: Option<u64>,
    constraint_count: Option<u64>,
    match_count: Option<u64>,
    hard_delta: Option<i64>,
    soft_delta: Option<i64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, format!("{:?}", value).trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "employee_count" => self.employee_count = Some(value),
            "shift_count" => self.shift_count = Some(value),
            "assigned_count" => self.assigned_count = Some(value),
            "availability_count" => self.availability_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "match_count" => self.match_count = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "hard_delta" => self.hard_delta = Some(value),
            "soft_delta" => self.soft_delta = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = Some(value.to_string());
        match field.name() {
            "event" => self.event = value,
            "shift" => self.shift = value,
            "employee" => self.employee = value,
            "from" => self.from = value,
            "to" => self.to = value,
            "score" => self.score = value,
            _ => {}
        }
    }
}

fn format_engine_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("engine_init") => format_engine_init(v),
        Some("move") => format_move(v),
        Some("redundant_move") => format_redundant_move(v),
        _ => String::new(),
    }
}

fn format_engine_init(v: &EventVisitor) -> String {
    let count = |n: Option<u64>| n.unwrap_or(0).to_formatted_string(&Locale::en);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} {} employees ({}), shifts ({}, {} assigned), availabilities ({}), constraints ({}), matches ({}), score ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Engine]".bright_cyan(),
        count(v.employee_count).bright_yellow(),
        count(v.shift_count).bright_yellow(),
        count(v.assigned_count).yellow(),
        count(v.availability_count).bright_yellow(),
        count(v.constraint_count).bright_yellow(),
        count(v.match_count).bright_magenta(),
        format_score(score)
    )
}

fn format_move(v: &EventVisitor) -> String {
    let shift = v.shift.as_deref().unwrap_or("?");
    let from = v.from.as_deref().map_or("?", format_assignee);
    let to = v.to.as_deref().map_or("?", format_assignee);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "    {} {} {} -> {} | {} | {}",
        "->".bright_blue(),
        shift.white().bold(),
        from,
        to,
        format_delta(v.hard_delta.unwrap_or(0), v.soft_delta.unwrap_or(0)),
        format_score(score)
    )
}

fn format_redundant_move(v: &EventVisitor) -> String {
    let shift = v.shift.as_deref().unwrap_or("?");
    let target = v.employee.as_deref().unwrap_or("unassigned");

    format!(
        "{} {} {} {} already on {}, skipped",
        timestamp().bright_black(),
        "DEBUG".bright_blue(),
        "[Engine]".bright_cyan(),
        shift.white(),
        target.white()
    )
}

/// Strips the `Some(..)` of a debug-formatted optional employee.
fn format_assignee(value: &str) -> &str {
    match value {
        "None" => "-",
        other => other
            .strip_prefix("Some(")
            .and_then(|inner| inner.strip_suffix(')'))
            .unwrap_or(other),
    }
}

fn format_delta(hard: i64, soft: i64) -> String {
    let hard_str = format!("{:+}hard", hard);
    let soft_str = format!("{:+}soft", soft);

    let hard_str = match hard.signum() {
        -1 => hard_str.bright_red().to_string(),
        1 => hard_str.bright_green().to_string(),
        _ => hard_str.bright_black().to_string(),
    };
    let soft_str = match soft.signum() {
        -1 => soft_str.yellow().to_string(),
        1 => soft_str.bright_green().to_string(),
        _ => soft_str.bright_black().to_string(),
    };

    format!("{}/{}", hard_str, soft_str)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_score(score: &str) -> String {
    // "-2hard/5soft" or "0hard/10soft"
    let Some((hard, soft)) = score.split_once('/').filter(|_| score.contains("hard")) else {
        return score.white().to_string();
    };
    let hard = hard.trim_end_matches("hard");
    let soft = soft.trim_end_matches("soft");

    let hard_num: i64 = hard.parse().unwrap_or(0);
    let soft_num: i64 = soft.parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };

    let soft_str = if soft_num < 0 {
        format!("{}soft", soft).yellow().to_string()
    } else if soft_num > 0 {
        format!("{}soft", soft).bright_green().to_string()
    } else {
        format!("{}soft", soft).white().to_string()
    };

    format!("{}/{}", hard_str, soft_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_format_score_keeps_text() {
        assert_eq!(strip_ansi(&format_score("-2hard/5soft")), "-2hard/5soft");
        assert_eq!(strip_ansi(&format_score("0hard/0soft")), "0hard/0soft");
        assert_eq!(strip_ansi(&format_score("N/A")), "N/A");
    }

    #[test]
    fn test_format_delta_signs() {
        assert_eq!(strip_ansi(&format_delta(-60, 0)), "-60hard/+0soft");
        assert_eq!(strip_ansi(&format_delta(0, 480)), "+0hard/+480soft");
    }

    #[test]
    fn test_format_assignee() {
        assert_eq!(format_assignee("Some(E3)"), "E3");
        assert_eq!(format_assignee("None"), "-");
        assert_eq!(format_assignee("E3"), "E3");
    }

    #[test]
    fn test_format_move_event() {
        let v = EventVisitor {
            event: Some("move".to_string()),
            shift: Some("S4".to_string()),
            from: Some("None".to_string()),
            to: Some("Some(E1)".to_string()),
            score: Some("-61hard/0soft".to_string()),
            hard_delta: Some(-61),
            soft_delta: Some(0),
            ..EventVisitor::default()
        };
        assert_eq!(
            strip_ansi(&format_engine_event(&v)),
            "    -> S4 - -> E1 | -61hard/+0soft | -61hard/0soft"
        );
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let v = EventVisitor {
            event: Some("something_else".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_engine_event(&v).is_empty());
    }
}
