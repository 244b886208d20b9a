//! Interactive input helpers for the shell.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};

use siren_core::calls::{EmergencyCall, IncidentType};
use siren_core::traits::CallService;

use crate::dashboard::Dashboard;
use crate::output;

/// Read one line, returning None at end of input.
pub fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input")?;

    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Prompt for a username/password pair.
pub fn credentials() -> Result<Option<(String, String)>> {
    let Some(username) = prompt("Username: ")? else {
        return Ok(None);
    };
    let Some(password) = prompt("Password: ")? else {
        return Ok(None);
    };
    Ok(Some((username, password)))
}

/// Client-side password check, applied before any registration request.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 6 {
        Err("Password must be at least 6 characters long")
    } else {
        Ok(())
    }
}

/// Translate a 1-based page argument into the zero-based index.
///
/// The translation is exact; anything but a positive integer is rejected.
/// Indexes past the last page are passed through for the server to handle.
pub fn parse_page_number(arg: &str) -> Result<u32, String> {
    match arg.trim().parse::<u32>() {
        Ok(value) if value >= 1 => Ok(value - 1),
        _ => Err(format!("'{}' is not a valid page number", arg.trim())),
    }
}

/// Parse a record id argument.
pub fn parse_id(arg: &str) -> Result<i64, String> {
    arg.trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a valid call id", arg.trim()))
}

/// Parse a filter argument: an incident type name, or `off` to clear.
pub fn parse_filter(arg: &str) -> Result<Option<IncidentType>, String> {
    let arg = arg.trim();
    if arg.is_empty() || arg.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    arg.parse::<IncidentType>()
        .map(Some)
        .map_err(|_| format!("'{}' is not an incident type (FIRE, CRIME, ACCIDENT)", arg))
}

/// Fill the new-call draft from the prompt, field by field.
///
/// The current draft values are the defaults, so a draft kept after a
/// failed submit comes back pre-filled for retry. Returns false at end of
/// input; the draft is only replaced once every field is gathered.
pub fn new_call<S: CallService>(dashboard: &Dashboard<S>) -> Result<bool> {
    let Some(draft) = fill_call(dashboard.new_draft())? else {
        return Ok(false);
    };
    dashboard.set_new_draft(draft);
    Ok(true)
}

/// Fill the edit draft from the prompt and confirm the save.
///
/// Returns true when the user confirms; the caller then submits. Any other
/// answer (or end of input) leaves the server untouched.
pub fn edit_call<S: CallService>(dashboard: &Dashboard<S>) -> Result<bool> {
    let Some(current) = dashboard.edit_draft() else {
        return Ok(false);
    };
    let Some(draft) = fill_call(current)? else {
        return Ok(false);
    };
    dashboard.set_edit_draft(draft);

    let Some(answer) = prompt("Save changes? [y/N]: ")? else {
        return Ok(false);
    };
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Prompt for each record field, keeping the given values as defaults.
fn fill_call(mut call: EmergencyCall) -> Result<Option<EmergencyCall>> {
    let Some(caller_name) = prompt_text("Caller name", &call.caller_name)? else {
        return Ok(None);
    };
    let Some(position) = prompt_text("Position", &call.position)? else {
        return Ok(None);
    };
    let Some(incident_type) = prompt_parsed("Incident type", call.incident_type)? else {
        return Ok(None);
    };
    let Some(status) = prompt_parsed("Status", call.status)? else {
        return Ok(None);
    };

    call.caller_name = caller_name;
    call.position = position;
    call.incident_type = incident_type;
    call.status = status;
    Ok(Some(call))
}

/// Prompt for a text field, keeping `current` when the input is empty.
fn prompt_text(label: &str, current: &str) -> Result<Option<String>> {
    let line = prompt(&format!("{} [{}]: ", label, current))?;
    Ok(line.map(|value| {
        if value.trim().is_empty() {
            current.to_string()
        } else {
            value.trim().to_string()
        }
    }))
}

/// Prompt for an enumerated field, re-asking until the input parses.
fn prompt_parsed<T>(label: &str, current: T) -> Result<Option<T>>
where
    T: FromStr + std::fmt::Display + Copy,
{
    loop {
        let Some(value) = prompt(&format!("{} [{}]: ", label, current))? else {
            return Ok(None);
        };
        let value = value.trim();
        if value.is_empty() {
            return Ok(Some(current));
        }
        match value.parse::<T>() {
            Ok(parsed) => return Ok(Some(parsed)),
            Err(_) => output::error(&format!("'{}' is not a valid {}", value, label)),
        }
    }
}
