use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;

use ffc_curve::Session;
use ffc_curve::ops;
use ffc_curve::ops::Remaining;
use ffc_curve::session::ReminderView;
use ffc_curve::time::Timestamp;
use ffc_curve::types::Label;
use ffc_curve::types::ReminderRecord;

/// Every string the panel prints. Defaults are English.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelText {
    pub title: String,
    pub expired: String,
    pub waiting: String,
    pub empty: String,
    pub nothing: String,
    pub day: String,
    pub days: String,
    pub hour: String,
    pub hours: String,
    pub minute: String,
    pub minutes: String,
    pub under_a_minute: String,
}

impl Default for PanelText {
    fn default() -> Self {
        Self {
            title: "File Forgetting Curve".to_string(),
            expired: "Expired".to_string(),
            waiting: "Waiting for a reminder".to_string(),
            empty: "Empty".to_string(),
            nothing: "-".to_string(),
            day: "day".to_string(),
            days: "days".to_string(),
            hour: "hour".to_string(),
            hours: "hours".to_string(),
            minute: "minute".to_string(),
            minutes: "minutes".to_string(),
            under_a_minute: "less than a minute".to_string(),
        }
    }
}

impl PanelText {
    pub fn format_remaining(&self, r: Remaining) -> String {
        let mut parts = Vec::new();
        let mut push = |n: i64, one: &str, many: &str| {
            if n > 0 {
                parts.push(format!("{n} {}", if n == 1 { one } else { many }));
            }
        };
        push(r.days, &self.day, &self.days);
        push(r.hours, &self.hour, &self.hours);
        push(r.minutes, &self.minute, &self.minutes);
        if parts.is_empty() {
            self.under_a_minute.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Side panel listing expired and upcoming reminders for one label.
pub struct ReminderPanel {
    text: PanelText,
    labels: Vec<Label>,
    selected: Option<String>,
    /// A requested label key that names no label. Both lists stay empty.
    unknown: Option<String>,
    pinned: bool,
    view: Option<ReminderView>,
}

impl ReminderPanel {
    /// Build a panel for `label` (id or name). Without one, the first label
    /// is shown, switching to a label that has expired reminders when the
    /// first has none. A label that does not exist leaves both lists empty.
    pub fn new(session: &Session, label: Option<&str>, text: PanelText) -> Self {
        let mut panel = Self {
            text,
            labels: Vec::new(),
            selected: None,
            unknown: None,
            pinned: false,
            view: None,
        };
        panel.select_label(session, label);
        panel
    }

    /// Pin the panel to a label (id or name), or unpin with `None`.
    pub fn select_label(&mut self, session: &Session, key: Option<&str>) {
        self.pinned = key.is_some();
        self.selected = None;
        self.unknown = None;
        if let Some(key) = key {
            match session.resolve_label(key) {
                Ok(label) => self.selected = Some(label.id.clone()),
                Err(_) => {
                    tracing::debug!("panel pinned to unknown label {key}");
                    self.unknown = Some(key.to_string());
                }
            }
        }
        self.refresh(session);
    }

    /// Re-read labels and reminders from the session.
    pub fn refresh(&mut self, session: &Session) {
        self.labels = session.labels().to_vec();
        if let Some(key) = self.unknown.as_deref() {
            self.view = Some(session.view(Some(key)));
            return;
        }
        if self.labels.is_empty() {
            self.selected = None;
            self.view = None;
            return;
        }
        let still_known = self
            .selected
            .as_deref()
            .is_some_and(|id| self.labels.iter().any(|l| l.id == id));
        if !still_known {
            self.pinned = false;
            self.selected = self.labels.first().map(|l| l.id.clone());
        }

        let mut view = session.view(self.selected.as_deref());
        if !self.pinned
            && view.due.is_empty()
            && let Some(label) =
                ops::first_label_with_due(session.records(), &self.labels, view.now)
        {
            tracing::debug!("panel switching to label {} with expired files", label.name);
            self.selected = Some(label.id.clone());
            view = session.view(self.selected.as_deref());
        }
        self.view = Some(view);
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn selected_label(&self) -> Option<&Label> {
        let id = self.selected.as_deref()?;
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn view(&self) -> Option<&ReminderView> {
        self.view.as_ref()
    }

    fn record_lines(&self, out: &mut Vec<Line<'static>>, rec: &ReminderRecord, now: Timestamp) {
        let mut head = vec![Span::from(format!("- {}", rec.shown_name())).bold()];
        if let Some(left) = ops::remaining(rec.due_at, now) {
            head.push(Span::from(format!("  {}", self.text.format_remaining(left))).dim());
        }
        out.push(Line::from(head));
        if !rec.note.is_empty() {
            out.push(Line::from(format!("  {}", rec.note)).italic());
        }
        if !rec.display_name.is_empty() {
            out.push(Line::from(format!("  {}", rec.file_name())).dim());
        }
    }

    fn section(
        &self,
        out: &mut Vec<Line<'static>>,
        title: &str,
        recs: &[ReminderRecord],
        now: Timestamp,
    ) {
        out.push(Line::from(title.to_string()).bold().underlined());
        if recs.is_empty() {
            out.push(Line::raw(self.text.nothing.clone()));
        }
        for rec in recs {
            self.record_lines(out, rec, now);
        }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let name = self
            .unknown
            .as_deref()
            .or_else(|| self.selected_label().map(|l| l.name.as_str()));
        let (Some(view), Some(name)) = (self.view.as_ref(), name) else {
            lines.push(Line::raw(self.text.title.clone()).bold());
            lines.push(Line::raw(self.text.empty.clone()));
            return lines;
        };
        lines.push(Line::from(vec![
            Span::from(self.text.title.clone()).bold(),
            Span::from(format!(" [{name}]")),
        ]));
        self.section(&mut lines, &self.text.expired, &view.due, view.now);
        self.section(&mut lines, &self.text.waiting, &view.pending, view.now);
        lines
    }
}

impl WidgetRef for ReminderPanel {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines()).render(area, buf);
    }
}

/// Render into an off-screen buffer and return its rows without trailing
/// blanks.
pub fn render_to_lines(panel: &ReminderPanel, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    panel.render_ref(area, &mut buf);
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
