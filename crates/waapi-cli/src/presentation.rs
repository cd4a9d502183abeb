//! Envelope rendering.
//!
//! Format-only: no gateway calls and no interpretation beyond the
//! `"success"` status check.

use waapi::Envelope;

use crate::error::CliError;

/// Render an envelope either as raw JSON or as a short human summary.
pub fn render_envelope(envelope: &Envelope, json: bool) -> Result<String, CliError> {
    if json {
        return serde_json::to_string_pretty(envelope).map_err(|e| CliError::Output(e.to_string()));
    }

    let marker = if envelope.is_success() { "✓" } else { "✗" };
    let mut out = format!("{marker} {}", envelope.status);
    if let Some(message) = &envelope.message {
        out.push_str(": ");
        out.push_str(message);
    }
    if let Some(data) = &envelope.data {
        let pretty =
            serde_json::to_string_pretty(data).map_err(|e| CliError::Output(e.to_string()))?;
        out.push('\n');
        out.push_str(&pretty);
    }
    Ok(out)
}
