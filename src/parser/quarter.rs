//! Désambiguïsation des lignes de quart `15` / `45`.
//!
//! Dans la mise en page source, un nom placé sur une ligne `15` appartient en
//! fait à l'heure pleine (et `45` à la demi-heure) sauf si la ligne suivante,
//! marquée `30`, porte elle-même des noms. Seuls ces deux cas sont traités.

use super::patterns;
use crate::model::GridRow;
use std::iter::Peekable;

/// Fenêtre glissante : ligne courante + une ligne d'avance.
pub struct RowWindow<I: Iterator<Item = GridRow>> {
    inner: Peekable<I>,
}

impl<I: Iterator<Item = GridRow>> RowWindow<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(rows: T) -> Self {
        Self {
            inner: rows.into_iter().peekable(),
        }
    }

    /// Ligne suivante et, si elle existe, celle qui la suit.
    pub fn advance(&mut self) -> Option<(GridRow, Option<&GridRow>)> {
        let current = self.inner.next()?;
        Some((current, self.inner.peek()))
    }
}

/// Vrai si `next` est une ligne `30` contenant au moins un nom.
pub fn next_appointments_at_30(next: Option<&GridRow>, spacer: &str) -> bool {
    next.is_some_and(|row| {
        row.margins().contains(&"30")
            && row.days().iter().any(|cell| patterns::is_content(cell, spacer))
    })
}

/// Décalage en minutes à appliquer aux noms de la ligne courante.
pub fn resolve_offset(quarter: u32, next: Option<&GridRow>, spacer: &str) -> u32 {
    match quarter {
        15 if !next_appointments_at_30(next, spacer) => 0,
        45 if !next_appointments_at_30(next, spacer) => 30,
        q => q,
    }
}
