//! Default value functions for configuration.

use ircling_proto::DEFAULT_MAX_LINE_LEN;

// =============================================================================
// Session Defaults
// =============================================================================

pub fn default_inbox_capacity() -> usize {
    256
}

pub fn default_max_inflight_handlers() -> usize {
    64
}

pub fn default_event_capacity() -> usize {
    256
}

pub fn default_max_line_len() -> usize {
    DEFAULT_MAX_LINE_LEN
}

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_level() -> String {
    "info".to_string()
}
