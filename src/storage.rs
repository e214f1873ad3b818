use crate::sync::{CalendarEvent, CalendarService, EventDraft};
use anyhow::{bail, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Calendrier local stocké dans un fichier JSON (tableau d'événements).
pub struct JsonCalendar {
    path: PathBuf,
}

impl JsonCalendar {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fichier absent = calendrier vide.
    pub fn load(&self) -> anyhow::Result<Vec<CalendarEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let events: Vec<CalendarEvent> = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(events)
    }

    /// Sauvegarde de manière atomique.
    pub fn save(&self, events: &[CalendarEvent]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(events)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl CalendarService for JsonCalendar {
    fn events(&self) -> anyhow::Result<Vec<CalendarEvent>> {
        self.load()
    }

    fn create_event(&mut self, draft: &EventDraft) -> anyhow::Result<String> {
        let mut events = self.load()?;
        let uid = Uuid::new_v4().to_string();
        events.push(CalendarEvent {
            uid: uid.clone(),
            summary: draft.summary.clone(),
            description: Some(draft.description.clone()),
            start: draft.start,
            end: draft.end,
        });
        self.save(&events)?;
        Ok(uid)
    }

    fn delete_event(&mut self, uid: &str) -> anyhow::Result<()> {
        let mut events = self.load()?;
        let before = events.len();
        events.retain(|ev| ev.uid != uid);
        if events.len() == before {
            bail!("unknown event uid: {uid}");
        }
        self.save(&events)
    }
}
