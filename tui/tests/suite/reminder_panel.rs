use ffc_curve::Session;
use ffc_curve::clock::FixedClock;
use ffc_curve::factory::Backend;
use ffc_curve::factory::open_vault_store;
use ffc_curve::types::ReminderPatch;
use ffc_tui::PanelText;
use ffc_tui::ReminderPanel;
use pretty_assertions::assert_eq;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::widgets::WidgetRef;
use tempfile::tempdir;

fn session_at(vault: &std::path::Path, now: &str) -> Session {
    let store = open_vault_store(vault, Some(Backend::Json)).unwrap();
    Session::open(store, Box::new(FixedClock::parse(now).unwrap())).unwrap()
}

/// Two labels: "Work" with one pending file, "Home" with one expired file.
fn seeded_vault() -> anyhow::Result<tempfile::TempDir> {
    let dir = tempdir()?;
    let mut session = session_at(dir.path(), "2024-05-01 10:00:00");
    let work = session.create_label("Work")?;
    let home = session.create_label("Home")?;
    session.attach(
        "work/plan.md",
        ReminderPatch::new(&work.id, 1440).with_note("quarterly"),
    )?;
    session.attach(
        "home/garden.md",
        ReminderPatch::new(&home.id, 20).with_display_name("Garden"),
    )?;
    Ok(dir)
}

fn draw(panel: &ReminderPanel, height: u16) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(40, height)).unwrap();
    terminal
        .draw(|f| panel.render_ref(f.area(), f.buffer_mut()))
        .unwrap();
    terminal
}

#[test]
fn panel_renders_empty_without_labels() {
    let dir = tempdir().unwrap();
    let session = session_at(dir.path(), "2024-05-01 10:00:00");
    let panel = ReminderPanel::new(&session, None, PanelText::default());
    let terminal = draw(&panel, 3);
    insta::assert_snapshot!(terminal.backend());
}

#[test]
fn panel_switches_to_label_with_expired_files() {
    let dir = seeded_vault().unwrap();
    let session = session_at(dir.path(), "2024-05-01 11:00:00");
    let panel = ReminderPanel::new(&session, None, PanelText::default());
    assert_eq!(panel.selected_label().map(|l| l.name.as_str()), Some("Home"));
    assert!(!panel.is_pinned());

    let terminal = draw(&panel, 6);
    insta::assert_snapshot!(terminal.backend());
}

#[test]
fn pinned_label_shows_pending_with_time_left() {
    let dir = seeded_vault().unwrap();
    let session = session_at(dir.path(), "2024-05-01 11:00:00");
    let panel = ReminderPanel::new(&session, Some("Work"), PanelText::default());
    assert_eq!(panel.selected_label().map(|l| l.name.as_str()), Some("Work"));

    let terminal = draw(&panel, 6);
    insta::assert_snapshot!(terminal.backend());
}

#[test]
fn unknown_label_shows_empty_lists() {
    let dir = seeded_vault().unwrap();
    let session = session_at(dir.path(), "2024-05-01 11:00:00");
    let panel = ReminderPanel::new(&session, Some("Nope"), PanelText::default());
    assert!(panel.selected_label().is_none());
    assert!(panel.is_pinned());
    let view = panel.view().unwrap();
    assert!(view.due.is_empty());
    assert!(view.pending.is_empty());

    let terminal = draw(&panel, 5);
    insta::assert_snapshot!(terminal.backend());
}

#[test]
fn select_label_pins_and_unpins() {
    let dir = seeded_vault().unwrap();
    let session = session_at(dir.path(), "2024-05-01 11:00:00");
    let mut panel = ReminderPanel::new(&session, None, PanelText::default());
    assert_eq!(panel.selected_label().map(|l| l.name.as_str()), Some("Home"));

    panel.select_label(&session, Some("Work"));
    assert!(panel.is_pinned());
    assert_eq!(panel.selected_label().map(|l| l.name.as_str()), Some("Work"));
    assert_eq!(panel.view().map(|v| v.due.len()), Some(0));
    assert_eq!(panel.view().map(|v| v.pending.len()), Some(1));

    // Unpinned, the panel goes back to the label with expired files.
    panel.select_label(&session, None);
    assert!(!panel.is_pinned());
    assert_eq!(panel.selected_label().map(|l| l.name.as_str()), Some("Home"));
    assert_eq!(panel.view().map(|v| v.due.len()), Some(1));
}

#[test]
fn refresh_picks_up_session_changes() {
    let dir = seeded_vault().unwrap();
    let mut session = session_at(dir.path(), "2024-05-01 11:00:00");
    let mut panel = ReminderPanel::new(&session, Some("Home"), PanelText::default());
    assert_eq!(panel.view().map(|v| v.due.len()), Some(1));

    session.detach("home/garden.md").unwrap();
    panel.refresh(&session);
    assert_eq!(panel.view().map(|v| v.due.len()), Some(0));

    session.remove_label("Home").unwrap();
    panel.refresh(&session);
    assert_eq!(panel.selected_label().map(|l| l.name.as_str()), Some("Work"));
}
