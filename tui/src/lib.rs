//! Terminal rendering of the reminder side panel.

pub mod reminder_panel;

pub use reminder_panel::PanelText;
pub use reminder_panel::ReminderPanel;
pub use reminder_panel::render_to_lines;
