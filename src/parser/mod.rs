mod builder;
mod classify;
mod grid;
mod header;
mod patterns;
mod quarter;
mod types;

pub use builder::{build_appointment, AppointmentBuilder, APPOINTMENT_MINUTES};
pub use classify::{ClassifierState, RowClassifier, RowKind};
pub use grid::{normalize, normalize_line};
pub use header::locate_header;
pub use quarter::{next_appointments_at_30, resolve_offset, RowWindow};
pub use types::{CellError, LayoutOptions, ParseError, MAX_LINE_WIDTH};

use crate::model::Appointment;
use tracing::debug;

/// Résultat d'une analyse complète.
#[derive(Debug)]
pub struct ParseReport {
    pub header_index: usize,
    pub dates: Vec<Option<String>>,
    /// Ordre d'émission : ligne puis colonne.
    pub appointments: Vec<Appointment>,
    pub skipped: Vec<CellError>,
}

impl ParseReport {
    /// Aucun rendez-vous trouvé (résultat valide, distinct d'une erreur).
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

/// Parser : reconstruit les rendez-vous d'une grille texte à largeur fixe
#[derive(Debug, Clone, Default)]
pub struct Parser {
    opts: LayoutOptions,
}

impl Parser {
    pub fn new(opts: LayoutOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.opts
    }

    /// Analyse en une passe : normalisation, en-tête, puis classification
    /// ligne à ligne avec une ligne d'avance.
    ///
    /// Seule l'absence d'en-tête (ou une géométrie invalide) fait échouer
    /// l'analyse ; les cellules dont la date est invalide sont ignorées et
    /// listées dans [`ParseReport::skipped`].
    pub fn parse<I, S>(&self, lines: I) -> Result<ParseReport, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.opts.validate()?;

        let mut rows = grid::normalize(lines, &self.opts);
        let header = header::locate_header(&mut rows)?;

        let mut classifier = RowClassifier::new();
        classifier.header_found();
        let builder = AppointmentBuilder::new(&header, &self.opts);
        let mut window = RowWindow::new(rows);

        let mut appointments = Vec::new();
        let mut skipped = Vec::new();
        let mut index = header.index;

        while let Some((row, next)) = window.advance() {
            index += 1;
            let kind = classifier.step(&row);
            if !kind.carries_data() {
                continue;
            }
            let Some((hour, quarter)) = classifier.active() else {
                continue;
            };
            let minutes = quarter::resolve_offset(quarter, next, &self.opts.spacer);
            builder.build_row(index, &row, hour, minutes, &mut appointments, &mut skipped);
        }

        debug!(
            appointments = appointments.len(),
            skipped = skipped.len(),
            "grid parsed"
        );
        Ok(ParseReport {
            header_index: header.index,
            dates: header.dates.clone(),
            appointments,
            skipped,
        })
    }
}

/// Raccourci : seulement les rendez-vous.
pub fn parse_agenda<I, S>(lines: I, opts: &LayoutOptions) -> Result<Vec<Appointment>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Parser::new(opts.clone())
        .parse(lines)
        .map(|report| report.appointments)
}
