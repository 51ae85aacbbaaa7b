//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Maximum accepted node id length
pub const MAX_NODE_ID_LENGTH: usize = 256;

/// Validate a node id.
///
/// Ids are opaque warehouse keys (`"1042"`, `"0815-2210-abc"`), so only
/// emptiness, length and control characters are checked.
pub fn validate_node_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Node ID cannot be empty".to_string());
    }

    if s.len() > MAX_NODE_ID_LENGTH {
        return Err(format!(
            "Node ID cannot exceed {MAX_NODE_ID_LENGTH} characters (got {})",
            s.len()
        ));
    }

    if s.chars().any(char::is_control) {
        return Err("Node ID cannot contain control characters".to_string());
    }

    Ok(s.to_string())
}
