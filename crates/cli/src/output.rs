//! Terminal rendering
//!
//! Every renderer returns a `String` so commands stay easy to test; colors
//! are applied through `colored` and vanish when output is not a terminal.

use cadence_client::resources::{Cadence, Statistics, User};
use cadence_ui::{BadgeTone, CallRow, ContactRow, MailingRow, MenuEntry, PaginationView};
use colored::{ColoredString, Colorize};

fn badge(text: &str, tone: BadgeTone) -> ColoredString {
    match tone {
        BadgeTone::Primary => text.blue().bold(),
        BadgeTone::Danger => text.red().bold(),
        BadgeTone::Success => text.green().bold(),
        BadgeTone::Neutral => text.normal(),
    }
}

/// Rows, or the screen's empty message, followed by the pager
pub fn render_list(lines: Vec<String>, empty_message: &str, pagination: &PaginationView) -> String {
    let mut out = String::new();
    if lines.is_empty() {
        out.push_str(&empty_message.dimmed().to_string());
        out.push('\n');
    } else {
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push_str(&render_pagination(pagination));
    out
}

/// `1 … 8 9 [10] 11 12 … 20   91-100 of 200`
pub fn render_pagination(view: &PaginationView) -> String {
    let window = view
        .pages
        .iter()
        .map(|page| match page {
            Some(n) if *n == u64::from(view.page_number) => format!("[{n}]").bold().to_string(),
            Some(n) => n.to_string(),
            None => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    if window.is_empty() {
        format!("{}\n", view.summary().dimmed())
    } else {
        format!("{window}   {}\n", view.summary().dimmed())
    }
}

pub fn mailing_line(row: &MailingRow) -> String {
    format!(
        "{}  {:<10}  {}  {}{}",
        row.id.dimmed(),
        badge(row.state, row.tone),
        row.recipient,
        row.subject,
        row.scheduled
            .as_deref()
            .map(|at| format!("  ({at})"))
            .unwrap_or_default()
    )
}

pub fn call_line(row: &CallRow) -> String {
    format!(
        "{}  {}  [{}] {}  {}  {}  {}",
        row.id.dimmed(),
        row.title.bold(),
        row.kind,
        row.priority,
        row.status,
        row.assignee,
        row.due
    )
}

pub fn contact_line(row: &ContactRow) -> String {
    let mut parts = vec![
        row.step_id.dimmed().to_string(),
        row.name.bold().to_string(),
        badge(row.status.as_str(), row.tone).to_string(),
    ];
    parts.extend(row.step_label.clone());
    parts.extend(row.lead_status.clone());
    parts.extend(row.headline.clone());
    parts.extend(row.owner.as_ref().map(|owner| format!("owner: {owner}")));
    parts.join("  ")
}

pub fn render_menu(entries: &[MenuEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("  {}\n", entry.label))
        .collect()
}

pub fn render_statistics(stats: &Statistics) -> String {
    let entries = stats.entries();
    if entries.is_empty() {
        return format!("{}\n", "No statistics".dimmed());
    }
    entries
        .into_iter()
        .map(|(label, value)| format!("{label:<12}{value}\n"))
        .collect()
}

pub fn render_cadence(cadence: &Cadence) -> String {
    let mut out = format!("{} {}\n", cadence.name.bold(), cadence.id.dimmed());
    if !cadence.owner_id.is_empty() {
        out.push_str(&format!("  owner: {}\n", cadence.owner_id));
    }
    if let Some(updated) = cadence.updated_at.or(cadence.created_at) {
        out.push_str(&format!("  updated: {}\n", updated.format("%Y-%m-%d %H:%M")));
    }
    out
}

pub fn render_users(users: &[User]) -> String {
    if users.is_empty() {
        return format!("{}\n", "No users".dimmed());
    }
    users
        .iter()
        .map(|user| {
            format!(
                "{}  {}{}\n",
                user.id.dimmed(),
                user.display_name(),
                user.email
                    .as_deref()
                    .map(|email| format!(" <{email}>"))
                    .unwrap_or_default()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{PageState, StepStatus};
    use pretty_assertions::assert_eq;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_pagination_line() {
        plain();
        let view = PaginationView::new(&PageState {
            page_number: 2,
            page_size: 10,
            total_count: 25,
        });
        assert_eq!(render_pagination(&view), "1 [2] 3   11-20 of 25\n");
    }

    #[test]
    fn test_empty_list_prints_message() {
        plain();
        let view = PaginationView::new(&PageState::new());
        assert_eq!(render_list(Vec::new(), "No mailings", &view), "No mailings\n0 of 0\n");
    }

    #[test]
    fn test_menu_lines() {
        let entries: Vec<MenuEntry> = StepStatus::Finished
            .available_actions()
            .iter()
            .map(|&action| MenuEntry {
                action,
                label: action.label(),
            })
            .collect();
        assert_eq!(render_menu(&entries), "  Remove from cadence\n");
    }

    #[test]
    fn test_statistics_lines() {
        plain();
        let stats = Statistics {
            total_count: Some(4),
            ..Statistics::default()
        };
        assert_eq!(render_statistics(&stats), "Total       4\n");
        assert_eq!(render_statistics(&Statistics::default()), "No statistics\n");
    }
}
