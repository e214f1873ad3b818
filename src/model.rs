use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ligne normalisée de la grille : marge gauche, `num_days` colonnes de jours, marge droite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    cells: Vec<String>,
}

impl GridRow {
    /// Construit une ligne à partir de cellules déjà découpées et nettoyées.
    ///
    /// `cells` doit contenir au moins les deux marges.
    pub(crate) fn from_cells(cells: Vec<String>) -> Self {
        debug_assert!(cells.len() >= 2, "a grid row needs both margins");
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn left(&self) -> &str {
        &self.cells[0]
    }

    pub fn right(&self) -> &str {
        &self.cells[self.cells.len() - 1]
    }

    /// Marges dans l'ordre de consultation (gauche puis droite).
    pub fn margins(&self) -> [&str; 2] {
        [self.left(), self.right()]
    }

    /// Cellules des jours, sans les marges.
    pub fn days(&self) -> &[String] {
        &self.cells[1..self.cells.len() - 1]
    }

    pub fn day(&self, col: usize) -> Option<&str> {
        self.days().get(col).map(String::as_str)
    }
}

/// Ligne d'en-tête : index dans la grille et date `DD/MM` de chaque colonne de jour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    pub index: usize,
    pub dates: Vec<Option<String>>,
}

impl HeaderRow {
    pub fn date(&self, col: usize) -> Option<&str> {
        self.dates.get(col).and_then(|d| d.as_deref())
    }
}

/// État propagé d'une ligne à l'autre pendant la classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    /// Heure active `HH:MM`, telle que lue dans la marge.
    pub current_hour: Option<String>,
    /// Décalage en minutes : 0, 15, 30 ou 45.
    pub current_quarter: u32,
}

/// Rendez-vous reconstruit (valeur immuable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Appointment {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub name: String,
}

impl Appointment {
    pub fn new<D: Into<String>, N: Into<String>>(
        date: D,
        start: NaiveTime,
        end: NaiveTime,
        name: N,
    ) -> Self {
        Self {
            date: date.into(),
            start_time: start.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
            name: name.into(),
        }
    }

    /// `(jour, mois)` extraits de `DD/MM`, si la date est bien formée.
    pub fn day_month(&self) -> Option<(u32, u32)> {
        let (day, month) = self.date.split_once('/')?;
        Some((day.parse().ok()?, month.parse().ok()?))
    }
}

/// Regroupe les rendez-vous par jour, clé `(mois, jour)` pour un tri chronologique.
///
/// L'ordre d'émission est conservé à l'intérieur de chaque jour.
pub fn group_by_day(appointments: &[Appointment]) -> BTreeMap<(u32, u32), Vec<Appointment>> {
    let mut out: BTreeMap<(u32, u32), Vec<Appointment>> = BTreeMap::new();
    for app in appointments {
        if let Some((day, month)) = app.day_month() {
            out.entry((month, day)).or_default().push(app.clone());
        }
    }
    out
}
