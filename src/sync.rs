//! Synchronisation vers un calendrier externe.
//!
//! Hors du cœur d'analyse : le parser ne déduplique jamais. Ici on compare les
//! rendez-vous analysés aux événements existants (clé date + heure + nom),
//! puis on crée et supprime via un [`CalendarService`], en espaçant les appels.

use crate::model::Appointment;
use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

/// Options de synchronisation
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Année des dates `DD/MM`.
    pub year: i32,
    /// Décalage UTC des horaires de la grille, en minutes.
    pub utc_offset_minutes: i32,
    pub description: String,
    /// Pause entre deux appels au service.
    pub pause: std::time::Duration,
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            year: Local::now().year(),
            utc_offset_minutes: 120,
            description: "Afspraak uit TXT agenda".to_string(),
            pause: std::time::Duration::from_millis(500),
            dry_run: false,
        }
    }
}

impl SyncOptions {
    pub fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .with_context(|| format!("invalid UTC offset: {} minutes", self.utc_offset_minutes))
    }
}

/// Événement à créer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub summary: String,
    pub description: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl EventDraft {
    pub fn from_appointment(app: &Appointment, opts: &SyncOptions) -> Result<Self> {
        let offset = opts.offset()?;
        let (day, month) = app
            .day_month()
            .with_context(|| format!("invalid date {}", app.date))?;
        let date = NaiveDate::from_ymd_opt(opts.year, month, day)
            .with_context(|| format!("invalid date {}/{}", app.date, opts.year))?;
        let start_time = NaiveTime::parse_from_str(&app.start_time, "%H:%M")
            .with_context(|| format!("invalid start time {}", app.start_time))?;
        let end_time = NaiveTime::parse_from_str(&app.end_time, "%H:%M")
            .with_context(|| format!("invalid end time {}", app.end_time))?;

        let start = date.and_time(start_time);
        let mut end = date.and_time(end_time);
        if end <= start {
            end += Duration::days(1);
        }
        Ok(Self {
            summary: app.name.clone(),
            description: opts.description.clone(),
            start: offset
                .from_local_datetime(&start)
                .single()
                .context("ambiguous start")?,
            end: offset
                .from_local_datetime(&end)
                .single()
                .context("ambiguous end")?,
        })
    }
}

/// Événement présent dans le calendrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub uid: String,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// Service de calendrier (persistance des changements).
pub trait CalendarService {
    fn events(&self) -> Result<Vec<CalendarEvent>>;
    /// Retourne l'uid attribué.
    fn create_event(&mut self, draft: &EventDraft) -> Result<String>;
    fn delete_event(&mut self, uid: &str) -> Result<()>;
}

type SyncKey = (NaiveDate, String, String);

fn key_at(start: DateTime<FixedOffset>, summary: &str, offset: FixedOffset) -> SyncKey {
    let local = start.with_timezone(&offset);
    (
        local.date_naive(),
        local.format("%H:%M").to_string(),
        summary.to_string(),
    )
}

#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    pub to_create: Vec<EventDraft>,
    pub to_delete: Vec<CalendarEvent>,
}

impl SyncPlan {
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }
}

/// Jours couverts par l'en-tête de la grille (`ParseReport::dates`) pour `year`.
///
/// Les colonnes sans date ou dont la date est impossible sont ignorées.
pub fn covered_dates(dates: &[Option<String>], year: i32) -> Vec<NaiveDate> {
    dates
        .iter()
        .flatten()
        .filter_map(|date| {
            let (day, month) = date.split_once('/')?;
            NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
        })
        .collect()
}

/// Calcule créations et suppressions.
///
/// Seuls les événements tombant sur un jour de `covered` peuvent être
/// supprimés ; un événement sans uid n'est jamais supprimé. Un rendez-vous
/// dont la date ne se construit pas est ignoré avec un avertissement.
pub fn plan_sync(
    appointments: &[Appointment],
    covered: &[NaiveDate],
    events: &[CalendarEvent],
    opts: &SyncOptions,
) -> Result<SyncPlan> {
    let offset = opts.offset()?;

    let existing: HashSet<SyncKey> = events
        .iter()
        .map(|ev| key_at(ev.start, &ev.summary, offset))
        .collect();

    let mut wanted: HashSet<SyncKey> = HashSet::new();
    let mut plan = SyncPlan::default();
    for app in appointments {
        let draft = match EventDraft::from_appointment(app, opts) {
            Ok(d) => d,
            Err(err) => {
                warn!(?app, "appointment skipped: {err:#}");
                continue;
            }
        };
        let key = key_at(draft.start, &draft.summary, offset);
        if !wanted.insert(key.clone()) {
            continue;
        }
        if !existing.contains(&key) {
            plan.to_create.push(draft);
        }
    }

    plan.to_delete = events
        .iter()
        .filter(|ev| !ev.uid.is_empty())
        .filter(|ev| {
            let key = key_at(ev.start, &ev.summary, offset);
            covered.contains(&key.0) && !wanted.contains(&key)
        })
        .cloned()
        .collect();

    Ok(plan)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub created: usize,
    pub deleted: usize,
}

/// Applique le plan : créations puis suppressions, `opts.pause` entre chaque appel.
pub fn apply_plan(
    service: &mut dyn CalendarService,
    plan: &SyncPlan,
    opts: &SyncOptions,
) -> Result<SyncSummary> {
    let mut summary = SyncSummary::default();
    if opts.dry_run {
        for draft in &plan.to_create {
            info!(summary = %draft.summary, start = %draft.start.to_rfc3339(), "would create");
        }
        for ev in &plan.to_delete {
            info!(uid = %ev.uid, summary = %ev.summary, "would delete");
        }
        return Ok(summary);
    }

    let mut first = true;
    let mut pace = || {
        if !first && !opts.pause.is_zero() {
            std::thread::sleep(opts.pause);
        }
        first = false;
    };

    for draft in &plan.to_create {
        pace();
        let uid = service
            .create_event(draft)
            .with_context(|| format!("creating {} at {}", draft.summary, draft.start.to_rfc3339()))?;
        info!(%uid, summary = %draft.summary, start = %draft.start.to_rfc3339(), "created");
        summary.created += 1;
    }
    for ev in &plan.to_delete {
        pace();
        service
            .delete_event(&ev.uid)
            .with_context(|| format!("deleting {}", ev.uid))?;
        info!(uid = %ev.uid, summary = %ev.summary, "deleted");
        summary.deleted += 1;
    }
    Ok(summary)
}

/// Lit les événements, planifie puis applique.
pub fn sync_appointments(
    service: &mut dyn CalendarService,
    appointments: &[Appointment],
    covered: &[NaiveDate],
    opts: &SyncOptions,
) -> Result<SyncSummary> {
    let events = service.events()?;
    let plan = plan_sync(appointments, covered, &events, opts)?;
    info!(
        create = plan.to_create.len(),
        delete = plan.to_delete.len(),
        "sync planned"
    );
    apply_plan(service, &plan, opts)
}
