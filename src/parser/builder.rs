use super::{patterns, CellError, LayoutOptions, ParseError};
use crate::model::{Appointment, GridRow, HeaderRow};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

/// Durée fixe d'un rendez-vous, en minutes.
pub const APPOINTMENT_MINUTES: i64 = 30;

/// Combine `DD/MM`, l'année, `HH:MM` et le décalage en un rendez-vous de 30 minutes.
pub fn build_appointment(
    date: &str,
    hour: &str,
    minutes: u32,
    name: &str,
    year: i32,
) -> Result<Appointment, ParseError> {
    let fail = |reason| ParseError::DateTimeParse {
        date: date.to_string(),
        hour: hour.to_string(),
        minutes,
        reason,
    };

    let (day, month) = date.split_once('/').ok_or_else(|| fail("expected DD/MM"))?;
    let day: u32 = day.parse().map_err(|_| fail("day is not a number"))?;
    let month: u32 = month.parse().map_err(|_| fail("month is not a number"))?;
    let day = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| fail("invalid calendar date"))?;
    let time = NaiveTime::parse_from_str(hour, "%H:%M").map_err(|_| fail("invalid hour"))?;

    let start = NaiveDateTime::new(day, time) + Duration::minutes(i64::from(minutes));
    let end = start + Duration::minutes(APPOINTMENT_MINUTES);
    Ok(Appointment::new(date, start.time(), end.time(), name))
}

/// Émet les rendez-vous d'une ligne de données, colonne par colonne.
pub struct AppointmentBuilder<'a> {
    header: &'a HeaderRow,
    opts: &'a LayoutOptions,
}

impl<'a> AppointmentBuilder<'a> {
    pub fn new(header: &'a HeaderRow, opts: &'a LayoutOptions) -> Self {
        Self { header, opts }
    }

    /// Les cellules en erreur sont consignées dans `skipped` ; le reste de la ligne continue.
    pub fn build_row(
        &self,
        row_index: usize,
        row: &GridRow,
        hour: &str,
        minutes: u32,
        out: &mut Vec<Appointment>,
        skipped: &mut Vec<CellError>,
    ) {
        for (column, text) in row.days().iter().enumerate() {
            let Some(date) = self.header.date(column) else {
                continue;
            };
            if !patterns::is_content(text, &self.opts.spacer) {
                continue;
            }
            match build_appointment(date, hour, minutes, text, self.opts.year) {
                Ok(app) => out.push(app),
                Err(error) => {
                    warn!(row = row_index, column, name = %text, %error, "cell skipped");
                    skipped.push(CellError {
                        row: row_index,
                        column,
                        text: text.clone(),
                        error,
                    });
                }
            }
        }
    }
}
