use super::{patterns, ParseError};
use crate::model::{GridRow, HeaderRow};
use tracing::debug;

/// Consomme `rows` jusqu'à la première ligne portant une date `DD/MM` dans une colonne de jour.
///
/// L'itérateur reste positionné juste après l'en-tête.
pub fn locate_header<I>(rows: &mut I) -> Result<HeaderRow, ParseError>
where
    I: Iterator<Item = GridRow>,
{
    for (index, row) in rows.enumerate() {
        let dates: Vec<Option<String>> = row
            .days()
            .iter()
            .map(|cell| patterns::find_date(cell).map(str::to_string))
            .collect();
        if dates.iter().any(Option::is_some) {
            debug!(index, ?dates, "header row located");
            return Ok(HeaderRow { index, dates });
        }
    }
    Err(ParseError::NoHeaderFound)
}
