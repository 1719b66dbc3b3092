use anyhow::Result;
use serde_json::Value;

use super::AuditLog;

/// Export the full audit log as a pretty-printed JSON array of raw records.
pub fn export_json(log: &AuditLog) -> Result<String> {
    let records = log.load();
    let json = serde_json::to_string_pretty(&records)?;
    Ok(json)
}

/// Export the full audit log as CSV with one row per intercepted call.
pub fn export_csv(log: &AuditLog) -> Result<String> {
    let records = log.load();
    let mut output = String::from("index,tool_name,target\n");
    for (i, record) in records.iter().enumerate() {
        output.push_str(&format!(
            "{},{},{}\n",
            i + 1,
            csv_field(tool_name(record)),
            csv_field(target(record)),
        ));
    }
    Ok(output)
}

/// The tool name of a raw record, if any.
pub fn tool_name(record: &Value) -> &str {
    record.get("tool_name").and_then(|v| v.as_str()).unwrap_or("")
}

/// The interesting parameter of a raw record: the file path for file tools,
/// the command line for shell tools.
pub fn target(record: &Value) -> &str {
    let input = record.get("tool_input");
    input
        .and_then(|v| v.get("file_path"))
        .or_else(|| input.and_then(|v| v.get("command")))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
/// Shell commands are full of commas, so this is not optional.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
