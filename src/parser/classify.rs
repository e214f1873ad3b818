use super::patterns;
use crate::model::{GridRow, ParseState};
use tracing::trace;

/// États du classifieur de lignes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierState {
    AwaitingHeader,
    AwaitingHour,
    HourActive { hour: String, quarter: u32 },
}

/// Nature d'une ligne située après l'en-tête.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// `HH:MM` dans une marge : nouvelle heure, quart remis à 0.
    HourMarker(String),
    /// `15`, `30` ou `45` dans une marge, heure déjà active.
    QuarterMarker(u32),
    DataRow,
    /// Pas encore d'heure active (ou en-tête non trouvé).
    Inert,
}

impl RowKind {
    /// Les lignes de quart portent aussi des noms dans leurs colonnes de jour.
    pub fn carries_data(&self) -> bool {
        matches!(self, RowKind::QuarterMarker(_) | RowKind::DataRow)
    }
}

#[derive(Debug, Clone)]
pub struct RowClassifier {
    state: ClassifierState,
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RowClassifier {
    pub fn new() -> Self {
        Self {
            state: ClassifierState::AwaitingHeader,
        }
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    pub fn header_found(&mut self) {
        self.state = ClassifierState::AwaitingHour;
    }

    /// Heure et quart actifs, s'il y en a.
    pub fn active(&self) -> Option<(&str, u32)> {
        match &self.state {
            ClassifierState::HourActive { hour, quarter } => Some((hour.as_str(), *quarter)),
            _ => None,
        }
    }

    pub fn parse_state(&self) -> ParseState {
        match &self.state {
            ClassifierState::HourActive { hour, quarter } => ParseState {
                current_hour: Some(hour.clone()),
                current_quarter: *quarter,
            },
            _ => ParseState::default(),
        }
    }

    /// Classe une ligne sans modifier l'état.
    ///
    /// Un marqueur d'heure dans l'une ou l'autre marge l'emporte sur un
    /// marqueur de quart ; à type égal, la marge gauche passe avant la droite.
    pub fn classify(&self, row: &GridRow) -> RowKind {
        if self.state == ClassifierState::AwaitingHeader {
            return RowKind::Inert;
        }
        if let Some(hour) = row.margins().into_iter().find_map(patterns::hour_marker) {
            return RowKind::HourMarker(hour.to_string());
        }
        if self.active().is_none() {
            return RowKind::Inert;
        }
        if let Some(quarter) = row.margins().into_iter().find_map(patterns::quarter_marker) {
            return RowKind::QuarterMarker(quarter);
        }
        RowKind::DataRow
    }

    /// Applique la transition associée à `kind`.
    pub fn advance(&mut self, kind: &RowKind) {
        match kind {
            RowKind::HourMarker(hour) => {
                self.state = ClassifierState::HourActive {
                    hour: hour.clone(),
                    quarter: 0,
                };
            }
            RowKind::QuarterMarker(q) => {
                if let ClassifierState::HourActive { quarter, .. } = &mut self.state {
                    *quarter = *q;
                }
            }
            RowKind::DataRow | RowKind::Inert => {}
        }
    }

    pub fn step(&mut self, row: &GridRow) -> RowKind {
        let kind = self.classify(row);
        trace!(left = row.left(), right = row.right(), ?kind, "row classified");
        self.advance(&kind);
        kind
    }
}
