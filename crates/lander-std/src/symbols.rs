use crate::Style;

/// Returns a styled success checkmark
pub fn success_checkmark() -> String {
    Style::Success.paint("✓")
}
