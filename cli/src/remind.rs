use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::path::PathBuf;

use ffc_curve::CurveError;
use ffc_curve::Session;
use ffc_curve::clock::Clock;
use ffc_curve::clock::FixedClock;
use ffc_curve::clock::SystemClock;
use ffc_curve::factory;
use ffc_curve::ops;
use ffc_curve::ops::DueNotice;
use ffc_curve::time;
use ffc_curve::types::ReminderPatch;
use ffc_curve::types::ReminderRecord;
use ffc_tui::PanelText;
use ffc_tui::ReminderPanel;

use crate::lang;

/// Forgetting-curve reminders for files in a vault.
#[derive(Debug, Parser)]
#[command(name = "ffc", version)]
pub struct Cli {
    /// Vault directory; reminder paths are relative to it.
    #[arg(long, global = true, default_value = ".")]
    pub vault: PathBuf,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Manage labels.
    #[command(subcommand)]
    Label(LabelCommand),
    /// Manage the reminder attached to a file.
    #[command(subcommand)]
    Remind(RemindCommand),
    /// Show expired and upcoming reminders.
    List {
        /// Only show reminders with this label (name or id).
        #[arg(long)]
        label: Option<String>,
        /// Print the lists as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the "files expired" notice, if any.
    Notice,
    /// Check for expired files periodically until interrupted.
    Watch {
        /// Seconds between checks.
        #[arg(long, default_value_t = 300)]
        interval: u64,
    },
    /// Copy a JSON snapshot into a SQLite database.
    Migrate {
        /// Path to the source JSON snapshot
        #[arg(long)]
        json: PathBuf,
        /// Path to the destination SQLite database file
        #[arg(long)]
        sqlite: PathBuf,
    },
    /// Render the side panel.
    Panel {
        /// Pin the panel to this label (name or id).
        #[arg(long)]
        label: Option<String>,
        #[arg(long, default_value_t = 60)]
        width: u16,
        #[arg(long, default_value_t = 24)]
        height: u16,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum LabelCommand {
    /// Create a label.
    Add { name: String },
    /// Remove a label by name or id.
    Rm { label: String },
    /// List labels.
    List,
}

#[derive(Debug, clap::Subcommand)]
pub enum RemindCommand {
    /// Attach a reminder to a file, replacing any existing one.
    Add {
        file: PathBuf,
        /// Label name or id.
        #[arg(long)]
        label: String,
        /// Reminder level; defaults to the recommended one.
        #[arg(long)]
        level: Option<u32>,
        /// Display name; defaults to the file name.
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Change an existing reminder. Omitted fields keep their value.
    Edit {
        file: PathBuf,
        #[arg(long)]
        label: Option<String>,
        /// Defaults to the level after the current one.
        #[arg(long)]
        level: Option<u32>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Remove the reminder from a file.
    Rm { file: PathBuf },
    /// Show the selectable levels, classified against the file's current one.
    Levels { file: Option<PathBuf> },
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.cmd {
        Command::Migrate { json, sqlite } => {
            let n = ffc_curve::migrate::migrate_json_to_sqlite(&json, &sqlite)?;
            let count = n.to_string();
            println!("{}", lang::get("Migrated {{count}} reminders", &[("count", &count)]));
            Ok(())
        }
        Command::Watch { interval } => watch(&cli.vault, interval),
        Command::Label(cmd) => label(&mut open_session(&cli.vault)?, cmd),
        Command::Remind(cmd) => remind(&mut open_session(&cli.vault)?, &cli.vault, cmd),
        Command::List { label, json } => list(
            &mut open_session(&cli.vault)?,
            &cli.vault,
            label.as_deref(),
            json,
        ),
        Command::Notice => {
            let session = open_session(&cli.vault)?;
            if let Some(text) = notice_text(&session, &cli.vault) {
                println!("{text}");
            }
            Ok(())
        }
        Command::Panel {
            label,
            width,
            height,
        } => {
            let mut session = open_session(&cli.vault)?;
            drop_missing(&mut session, &cli.vault)?;
            let panel = ReminderPanel::new(&session, label.as_deref(), panel_text());
            for line in ffc_tui::render_to_lines(&panel, width, height) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn clock_from_env() -> anyhow::Result<Box<dyn Clock>> {
    match std::env::var("FFC_NOW") {
        Ok(s) if !s.trim().is_empty() => Ok(Box::new(FixedClock::parse(&s)?)),
        _ => Ok(Box::new(SystemClock)),
    }
}

fn open_session(vault: &Path) -> anyhow::Result<Session> {
    let store = factory::open_vault_store(vault, None)?;
    Session::open(store, clock_from_env()?)
        .with_context(|| format!("load reminders for {}", vault.display()))
}

/// Absolute form of `path`. A file that no longer exists is resolved through
/// its directory.
fn absolute(path: &Path) -> Option<PathBuf> {
    if let Ok(abs) = path.canonicalize() {
        return Some(abs);
    }
    let name = path.file_name()?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    dir.canonicalize().ok().map(|dir| dir.join(name))
}

/// Vault-relative, `/`-separated form of a user supplied path. Paths that
/// resolve outside the vault are taken as already vault-relative.
fn vault_path(vault: &Path, file: &Path) -> String {
    let rel = match (absolute(file), vault.canonicalize()) {
        (Some(abs), Ok(root)) => abs
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| file.to_path_buf()),
        _ => file.to_path_buf(),
    };
    let rel = rel.strip_prefix(".").unwrap_or(&rel);
    rel.to_string_lossy().replace('\\', "/")
}

fn drop_missing(session: &mut Session, vault: &Path) -> anyhow::Result<()> {
    let removed = session.reconcile(|p| vault.join(p).exists())?;
    if !removed.is_empty() {
        tracing::info!("dropped {} reminders for missing files", removed.len());
    }
    Ok(())
}

fn label(session: &mut Session, cmd: LabelCommand) -> anyhow::Result<()> {
    match cmd {
        LabelCommand::Add { name } => {
            let label = session.create_label(&name)?;
            println!("{}", lang::get("Created label {{label}}", &[("label", &label.name)]));
        }
        LabelCommand::Rm { label } => {
            let removed = session.remove_label(&label)?;
            println!("{}", lang::get("Removed label {{label}}", &[("label", &removed.name)]));
        }
        LabelCommand::List => {
            if session.labels().is_empty() {
                println!("{}", lang::get("No labels", &[]));
            }
            for label in session.labels() {
                println!("{}\t{}", label.id, label.name);
            }
        }
    }
    Ok(())
}

fn remind(session: &mut Session, vault: &Path, cmd: RemindCommand) -> anyhow::Result<()> {
    match cmd {
        RemindCommand::Add {
            file,
            label,
            level,
            name,
            note,
        } => {
            let path = vault_path(vault, &file);
            if !vault.join(&path).exists() {
                anyhow::bail!(lang::get("File not found: {{file}}", &[("file", &path)]));
            }
            let label_id = session.resolve_label(&label)?.id.clone();
            let level = level.unwrap_or_else(|| session.table().recommend(None).level);
            let patch = ReminderPatch::new(label_id, level)
                .with_display_name(ops::display_name(name.as_deref().unwrap_or(""), &path))
                .with_note(note.unwrap_or_default());
            let rec = session.attach(&path, patch)?;
            print_scheduled(&rec);
        }
        RemindCommand::Edit {
            file,
            label,
            level,
            name,
            note,
        } => {
            let path = vault_path(vault, &file);
            let Some(current) = session.find(&path).cloned() else {
                anyhow::bail!(lang::get("No reminder for {{file}}", &[("file", &path)]));
            };
            let label_id = match label {
                Some(key) => session.resolve_label(&key)?.id.clone(),
                None => current.label_id.clone(),
            };
            let level =
                level.unwrap_or_else(|| session.table().recommend(Some(current.level)).level);
            let display_name = match name {
                Some(name) => ops::display_name(&name, &path),
                None => current.display_name.clone(),
            };
            let patch = ReminderPatch::new(label_id, level)
                .with_display_name(display_name)
                .with_note(note.unwrap_or(current.note));
            let rec = session.attach(&path, patch)?;
            print_scheduled(&rec);
        }
        RemindCommand::Rm { file } => {
            let path = vault_path(vault, &file);
            if !session.detach(&path)? {
                anyhow::bail!(lang::get("No reminder for {{file}}", &[("file", &path)]));
            }
            println!("{}", lang::get("Removed reminder for {{file}}", &[("file", &path)]));
        }
        RemindCommand::Levels { file } => {
            let current = match file {
                Some(file) => {
                    let path = vault_path(vault, &file);
                    let Some(rec) = session.find(&path) else {
                        anyhow::bail!(lang::get("No reminder for {{file}}", &[("file", &path)]));
                    };
                    Some(rec.level)
                }
                None => None,
            };
            let now = session.now();
            let recommend = lang::get("Recommend", &[]);
            for opt in session.table().options(current) {
                let due = session
                    .table()
                    .find(opt.level)
                    .and_then(|l| l.due_at(now))
                    .map(|t| time::format(&t))
                    .unwrap_or_default();
                let mut line = format!(
                    "{}\t{due} - {} - {}",
                    opt.level,
                    lang::get(&opt.label, &[]),
                    lang::get(opt.difficulty.key(), &[]),
                );
                if opt.recommended {
                    line.push_str(&format!(" - {recommend}"));
                }
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn print_scheduled(rec: &ReminderRecord) {
    println!(
        "{}",
        lang::get(
            "Remind {{file}} at {{date}}",
            &[("file", &rec.file_path), ("date", &time::format(&rec.due_at))],
        )
    );
}

fn list(
    session: &mut Session,
    vault: &Path,
    label: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    drop_missing(session, vault)?;
    // An unknown label is not an error; it just selects nothing.
    let filter = label.map(|key| {
        session
            .resolve_label(key)
            .map(|l| l.id.clone())
            .unwrap_or_else(|_| key.to_string())
    });
    let view = session.view(filter.as_deref());

    if json {
        let out = serde_json::json!({
            "now": time::format(&view.now),
            "due": view.due,
            "pending": view.pending,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let text = panel_text();
    println!("{}", text.expired);
    print_records(&view.due, view.now, &text);
    println!("{}", text.waiting);
    print_records(&view.pending, view.now, &text);
    Ok(())
}

fn print_records(recs: &[ReminderRecord], now: time::Timestamp, text: &PanelText) {
    if recs.is_empty() {
        println!("  {}", text.nothing);
    }
    for rec in recs {
        let mut line = format!("  {}", rec.shown_name());
        if !rec.display_name.is_empty() {
            line.push_str(&format!(" ({})", rec.file_path));
        }
        if let Some(left) = ops::remaining(rec.due_at, now) {
            line.push_str(&format!("  {}", text.format_remaining(left)));
        }
        println!("{line}");
        if !rec.note.is_empty() {
            println!("    {}", rec.note);
        }
    }
}

fn notice_text(session: &Session, vault: &Path) -> Option<String> {
    let head = format!("{}!", lang::get("File Expired", &[]));
    let hint = lang::get("Run [ffc list] to check", &[]);
    match session.notice()? {
        DueNotice::Many(n) => Some(format!("{head}\n{n}\n{hint}")),
        DueNotice::Single(rec) => {
            // A stale record is cleaned up by the next list, not announced.
            if !vault.join(&rec.file_path).exists() {
                return None;
            }
            let mut text = format!("{head}\n{}\n{hint}", rec.shown_name());
            if !rec.note.is_empty() {
                text.push('\n');
                text.push_str(&rec.note);
            }
            Some(text)
        }
    }
}

fn watch(vault: &Path, interval: u64) -> anyhow::Result<()> {
    let mut session = open_session(vault)?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(async {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval.max(1)));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match session.reload() {
                        Ok(()) => {
                            if let Some(text) = notice_text(&session, vault) {
                                println!("{text}");
                            }
                        }
                        Err(e) => tracing::warn!("reloading reminders failed: {e:#}"),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("watch interrupted");
                    break;
                }
            }
        }
    });
    Ok(())
}

fn panel_text() -> PanelText {
    let t = |key: &str| lang::get(key, &[]);
    PanelText {
        title: t("File Forgetting Curve"),
        expired: t("Expired"),
        waiting: t("Waiting for a reminder"),
        empty: t("Empty"),
        nothing: "-".to_string(),
        day: t("day"),
        days: t("days"),
        hour: t("hour"),
        hours: t("hours"),
        minute: t("minute"),
        minutes: t("minutes"),
        under_a_minute: t("less than a minute"),
    }
}

/// User-facing text for an error, localizing validation failures.
pub fn describe_error(err: &anyhow::Error) -> String {
    let Some(curve) = err.downcast_ref::<CurveError>() else {
        return format!("{err:#}");
    };
    match curve {
        CurveError::UnknownLevel(level) => {
            lang::get("Unknown level: {{level}}", &[("level", &level.to_string())])
        }
        CurveError::DuplicateLabel(label) => {
            lang::get("Already exists label: {{label}}", &[("label", label)])
        }
        CurveError::EmptyLabelName => lang::get("Label name cannot be empty", &[]),
        CurveError::UnknownLabel(label) => {
            lang::get("Unknown label: {{label}}", &[("label", label)])
        }
        CurveError::InvalidSchedule(reason) => {
            lang::get("Invalid schedule: {{reason}}", &[("reason", reason)])
        }
    }
}
