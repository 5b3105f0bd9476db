//! Status report generation (text and JSON)

use anyhow::Result;
use serde::Serialize;

use tracker_engine::{Mode, TrackingList};

/// Snapshot of the observable engine state
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub mode: Mode,
    pub selected: Option<usize>,
    pub active: Option<usize>,
    pub total_time: i32,
    pub total_with_accumulated: i32,
    pub accumulated_time: i32,
    pub leaf_count: usize,
    pub total_hours_goal: i32,
    pub total_acc_hours_goal: i32,
    pub rows: Vec<NodeRow>,
}

/// One top-level entry as the display layer would render it
#[derive(Debug, Serialize)]
pub struct NodeRow {
    pub name: String,
    pub time: i32,
    pub height: usize,
    pub priority: i32,
    pub selected: bool,
    pub active: bool,
}

pub fn build(list: &TrackingList) -> StatusReport {
    let rows = list
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| NodeRow {
            name: node.name().to_owned(),
            time: node.time(),
            height: node.height(),
            priority: node.priority(),
            selected: list.selected_index() == Some(index),
            active: list.active_index() == Some(index),
        })
        .collect();

    StatusReport {
        mode: list.mode(),
        selected: list.selected_index(),
        active: list.active_index(),
        total_time: list.total_time(false),
        total_with_accumulated: list.total_time(true),
        accumulated_time: list.accumulated_time(),
        leaf_count: list.total_height(),
        total_hours_goal: list.total_hours_goal(),
        total_acc_hours_goal: list.total_acc_hours_goal(),
        rows,
    }
}

/// Print the report to stdout
pub fn print(list: &TrackingList, json: bool) -> Result<()> {
    let report = build(list);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("───────────────────────────────────────────────");
    println!("  mode: {}", report.mode);
    for (index, row) in report.rows.iter().enumerate() {
        let marker = match (row.selected, row.active) {
            (true, true) => "»●",
            (true, false) => "» ",
            (false, true) => " ●",
            (false, false) => "  ",
        };
        let nesting = if row.height > 1 {
            format!(" [{} merged]", row.height)
        } else {
            String::new()
        };
        println!(
            "{} {:<2} {:<16} {:>8}{}",
            marker,
            index,
            row.name,
            format_hours(row.time),
            nesting
        );
    }
    println!("───────────────────────────────────────────────");
    if report.accumulated_time != 0 {
        println!(
            "  total {} / with pool {}",
            format_hours(report.total_time),
            format_hours(report.total_with_accumulated)
        );
    } else {
        println!("  total {}", format_hours(report.total_time));
    }
    println!(
        "  goals: {}h day, {}h accumulated",
        report.total_hours_goal, report.total_acc_hours_goal
    );
    Ok(())
}

/// Seconds as `h:mm`; seconds below a full minute are not shown
fn format_hours(seconds: i32) -> String {
    format!("{}:{:02}", seconds / 3600, seconds / 60 % 60)
}
