use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Géométrie de la grille et contexte d'année.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub left_width: usize,
    pub day_width: usize,
    pub num_days: usize,
    pub right_width: usize,
    pub spacer: String,
    /// Année combinée avec les dates `DD/MM` de l'en-tête.
    pub year: i32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            left_width: 7,
            day_width: 27,
            num_days: 7,
            right_width: 6,
            spacer: "-".to_string(),
            year: Local::now().year(),
        }
    }
}

/// Largeur maximale d'une ligne de grille, marges comprises.
pub const MAX_LINE_WIDTH: usize = 4096;

impl LayoutOptions {
    /// Largeur minimale d'une ligne avant découpage.
    ///
    /// Saturée en cas de dépassement ; [`LayoutOptions::validate`] rejette ces géométries.
    pub fn total_width(&self) -> usize {
        self.checked_total_width().unwrap_or(usize::MAX)
    }

    pub fn checked_total_width(&self) -> Option<usize> {
        self.day_width
            .checked_mul(self.num_days)?
            .checked_add(self.left_width)?
            .checked_add(self.right_width)
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        if self.num_days == 0 {
            return Err(ParseError::InvalidLayout("num_days must be > 0".into()));
        }
        if self.left_width == 0 || self.day_width == 0 || self.right_width == 0 {
            return Err(ParseError::InvalidLayout("column widths must be > 0".into()));
        }
        if self.spacer.trim().is_empty() {
            return Err(ParseError::InvalidLayout("spacer cannot be blank".into()));
        }
        match self.checked_total_width() {
            Some(width) if width <= MAX_LINE_WIDTH => Ok(()),
            _ => Err(ParseError::InvalidLayout(format!(
                "line width exceeds {MAX_LINE_WIDTH} characters"
            ))),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no header row: no DD/MM date found in any day column")]
    NoHeaderFound,
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    #[error("cannot build date/time from {date} {hour} +{minutes}min: {reason}")]
    DateTimeParse {
        date: String,
        hour: String,
        minutes: u32,
        reason: &'static str,
    },
}

/// Cellule ignorée pendant la construction des rendez-vous.
#[derive(Debug)]
pub struct CellError {
    /// Index de la ligne dans l'entrée.
    pub row: usize,
    /// Colonne de jour (0-based).
    pub column: usize,
    pub text: String,
    pub error: ParseError,
}
