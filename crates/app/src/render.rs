//! Plain-text rendering of the dashboard for the terminal.

use std::fmt::Write as _;

use services::{DashboardView, DayProgress};

const BAR_WIDTH: usize = 20;

fn bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn day_line(out: &mut String, day: &DayProgress) {
    let marker = if day.is_today { "*" } else { " " };
    let _ = writeln!(
        out,
        "{marker} {} {}/{} {:>3}%",
        day.label, day.completed, day.total, day.percent
    );
}

pub fn status(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (starts {})",
        view.title(),
        view.start_date.format("%Y-%m-%d")
    );
    let _ = writeln!(out, "Hours  {}", view.hours);
    let _ = writeln!(out, "Tasks  {} ({} to go)", view.tasks, view.remaining_tasks);
    let _ = writeln!(
        out,
        "Week   {} {:>3}%",
        bar(view.weekly_progress),
        view.weekly_progress
    );
    out.push('\n');
    for day in &view.days {
        day_line(&mut out, day);
    }
    if view.can_advance {
        out.push_str("\nWeek complete. Run `roadmap advance` to move on.\n");
    }
    out
}

pub fn day_tasks(view: &DashboardView, day: u8) -> String {
    let mut out = String::new();
    let Some(row) = view.day(day) else {
        let _ = writeln!(out, "no day {day}");
        return out;
    };

    day_line(&mut out, row);
    if row.tasks.is_empty() {
        out.push_str("  nothing planned\n");
    }
    for task in &row.tasks {
        let check = if task.completed { "x" } else { " " };
        let _ = writeln!(
            out,
            "  [{check}] {:<14} {} ({})",
            task.id, task.title, task.time_estimate
        );
        if let Some(link) = &task.link {
            let _ = writeln!(out, "        {link}");
        }
        if let Some(line) = &task.motivational_line {
            let _ = writeln!(out, "        {line}");
        }
    }
    out
}
