#![forbid(unsafe_code)]
//! Agenda-rooster — reconstruction de rendez-vous depuis un agenda hebdomadaire aplati en texte.
//!
//! - Grille à largeur fixe : marge gauche, colonnes de jours, marge droite.
//! - En-tête `DD/MM`, marqueurs d'heure `HH:MM` et de quart `15`/`30`/`45`.
//! - Une seule passe, une ligne d'avance pour lever l'ambiguïté des quarts.
//! - Synchronisation vers un calendrier en dehors du parser.

pub mod io;
pub mod model;
pub mod parser;
pub mod storage;
pub mod sync;

pub use model::{group_by_day, Appointment, GridRow, HeaderRow, ParseState};
pub use parser::{parse_agenda, CellError, LayoutOptions, ParseError, ParseReport, Parser};
pub use storage::JsonCalendar;
pub use sync::{
    apply_plan, covered_dates, plan_sync, sync_appointments, CalendarEvent, CalendarService,
    EventDraft, SyncOptions, SyncPlan, SyncSummary,
};
