//! Plain-text rendering for the terminal front end.

use std::fmt::Write;

use db::models::{officer::Officer, shift::Shift};
use services::services::shift_filter::ShiftFilter;
use strum::IntoEnumIterator;

use crate::screens::{Alert, shifts::ShiftsView};

pub fn filter_bar(active: ShiftFilter) -> String {
    ShiftFilter::iter()
        .map(|f| {
            if f == active {
                format!("[{}]", f.label())
            } else {
                format!(" {} ", f.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shift_line(shift: &Shift) -> String {
    let mut line = format!(
        "{}  {} - {}  officer {}",
        shift.id,
        shift.start_time.format("%Y-%m-%d %H:%M"),
        shift.end_time.format("%Y-%m-%d %H:%M"),
        shift.officer_id
    );
    if let Some(recurrence) = &shift.recurrence {
        match recurrence.pattern {
            Some(pattern) => {
                let _ = write!(line, "  ({}", pattern);
            }
            None => line.push_str("  (repeats"),
        }
        if recurrence.interval > 1 {
            let _ = write!(line, " x{}", recurrence.interval);
        }
        line.push(')');
    }
    if let Some(title) = &shift.title {
        let _ = write!(line, "  {}", title);
    }
    line
}

pub fn shifts_view(view: &ShiftsView) -> String {
    match view {
        ShiftsView::Loading { message } => message.to_string(),
        ShiftsView::Error {
            title,
            message,
            action,
        } => format!("{}\n{}\n[{}]", title, message, action),
        ShiftsView::Empty {
            filter,
            title,
            description,
        } => format!("{}\n\n{}\n{}", filter_bar(*filter), title, description),
        ShiftsView::List {
            title,
            filter,
            shifts,
            refreshing,
        } => {
            let mut out = format!("{}\n{}\n", title, filter_bar(*filter));
            if *refreshing {
                out.push_str("(refreshing)\n");
            }
            for shift in shifts {
                out.push('\n');
                out.push_str(&shift_line(shift));
            }
            out
        }
    }
}

pub fn officer_line(officer: &Officer) -> String {
    let pto = &officer.pto_balances;
    format!(
        "{:<24} {:<8} {:<10} {:<20} {}{}  PTO v{} h{} s{}",
        officer.name,
        officer.badge,
        officer.rank,
        officer.department,
        officer.email,
        if officer.is_supervisor { "  (supervisor)" } else { "" },
        pto.vacation,
        pto.holiday,
        pto.sick
    )
}

pub fn alert(alert: &Alert) -> String {
    format!("{}: {}", alert.title, alert.message)
}
