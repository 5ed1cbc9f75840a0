mod reminder_panel;
