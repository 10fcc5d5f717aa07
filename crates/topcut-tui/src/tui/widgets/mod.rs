// TUI widget modules for each viewer panel.

pub mod bracket;
pub mod standings;
pub mod status_bar;
