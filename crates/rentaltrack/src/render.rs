//! Views of the customers currently renting.
//!
//! Renderers take the slice returned by
//! [`Registry::currently_renting`](crate::Registry::currently_renting) and
//! produce plain text for the terminal, JSON in the persisted record layout,
//! or an HTML fragment. The HTML renderer escapes every free-text field.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::error::Result;
use crate::history::Event;

/// Shown instead of a list when nobody is renting.
pub const EMPTY_MESSAGE: &str = "No customers are currently renting a vehicle.";

/// How event timestamps are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeDisplay {
    /// Convert to the local time zone.
    #[default]
    Local,
    /// Show UTC.
    Utc,
}

impl TimeDisplay {
    /// Format a timestamp for display.
    #[must_use]
    pub fn format(self, timestamp: &DateTime<Utc>) -> String {
        match self {
            Self::Local => timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Self::Utc => timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }

    /// Format an event's timestamp, showing the stored text as-is when it
    /// cannot be parsed.
    #[must_use]
    pub fn format_event(self, event: &Event) -> String {
        event
            .recorded_at()
            .map_or_else(|| event.timestamp.clone(), |ts| self.format(&ts))
    }
}

/// Escape text for embedding in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn vehicle_line(customer: &Customer) -> String {
    customer
        .current_vehicle()
        .map_or_else(|| "-".to_string(), crate::Vehicle::summary)
}

fn event_line(event: &Event, times: TimeDisplay) -> String {
    format!(
        "{} • {} • {}",
        event.kind,
        times.format_event(event),
        event.vehicle_summary
    )
}

/// Render customers as indented plain text.
#[must_use]
pub fn render_plain(customers: &[&Customer], times: TimeDisplay) -> String {
    if customers.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let mut out = String::new();
    for customer in customers {
        let _ = writeln!(out, "{} ({})", customer.name(), customer.phone());
        let _ = writeln!(out, "  Vehicle: {}", vehicle_line(customer));
        for event in customer.history() {
            let _ = writeln!(out, "    {}", event_line(event, times));
        }
    }
    out
}

/// Render customers as a JSON array in the persisted record layout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(customers: &[&Customer]) -> Result<String> {
    Ok(serde_json::to_string_pretty(customers)?)
}

/// Render customers as an HTML fragment.
#[must_use]
pub fn render_html(customers: &[&Customer], times: TimeDisplay) -> String {
    if customers.is_empty() {
        return format!("<p>{}</p>\n", escape_html(EMPTY_MESSAGE));
    }

    let mut out = String::from("<ul>\n");
    for customer in customers {
        out.push_str("  <li>\n");
        out.push_str("    <div class=\"list-item-title\">\n");
        let _ = writeln!(
            out,
            "      <div><strong>{}</strong><br><small>{}</small></div>",
            escape_html(customer.name()),
            escape_html(customer.phone())
        );
        out.push_str("      <div class=\"label-badge\">Renting</div>\n");
        out.push_str("    </div>\n");
        let _ = writeln!(
            out,
            "    <div class=\"vehicle\">Vehicle: {}</div>",
            escape_html(&vehicle_line(customer))
        );
        out.push_str("    <div class=\"history\">\n");
        for event in customer.history() {
            let _ = writeln!(
                out,
                "      <div class=\"meta\">{}</div>",
                escape_html(&event_line(event, times))
            );
        }
        out.push_str("    </div>\n");
        out.push_str("  </li>\n");
    }
    out.push_str("</ul>\n");
    out
}
