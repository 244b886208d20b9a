//! Table rendering for the dashboard view.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use siren_core::calls::EmergencyCall;

use crate::dashboard::PageState;
use crate::output;

/// Build the call-list table.
pub fn calls_table(calls: &[EmergencyCall]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Caller Name", "Position", "Incident Type", "Status"]);

    for call in calls {
        table.add_row(vec![
            call.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            call.caller_name.clone(),
            call.position.clone(),
            call.incident_type.to_string(),
            call.status.to_string(),
        ]);
    }

    table
}

/// Print the current page: the table plus a pagination line.
pub fn page(state: &PageState) {
    if state.calls.is_empty() {
        eprintln!("{}", "No emergency calls.".dimmed());
    } else {
        println!("{}", calls_table(&state.calls));
    }

    if state.total_pages > 0 {
        // Displayed 1-based, stored 0-based.
        println!(
            "{}",
            format!("page {}/{}", state.current_page + 1, state.total_pages).dimmed()
        );
    }
}

/// Print a single record.
pub fn detail(call: &EmergencyCall) {
    let id = call.id.map_or_else(|| "-".to_string(), |id| id.to_string());
    output::field("ID", &id);
    output::field("Caller Name", &call.caller_name);
    output::field("Position", &call.position);
    output::field("Incident Type", &call.incident_type.to_string());
    output::field("Status", &call.status.to_string());
}
