//! Default value functions shared by configuration sections.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}
