use super::Mode;

/// `MM:SS`, minutes not capped at 59.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Terminal/window title for the current countdown.
pub fn title_line(seconds: u32, mode: Mode) -> String {
    let activity = if mode.is_break() { "Resting" } else { "Working" };
    format!("{} - {activity}", format_clock(seconds))
}
