//! Detailed conjugation (Sarf Kabeer) table.
//!
//! Seven grid columns: 0-2 carry the right-hand term, 3 is a border-less
//! spacer and 4-6 carry the left-hand term. Every term pair produces a
//! caption row, its value rows in chunks of three and a separator row.

use crate::arabic::ArabicWord;
use crate::error::Error;
use crate::helper::{self, ARABIC_CAPTION_STYLE, ARABIC_TABLE_CENTER_STYLE};
use crate::model::{Cell, CellBorders, Row, Table};
use crate::sarf::{SarfKabeer, SarfTerm};

const COLUMNS: u32 = 7;
const CHUNK: usize = 3;
const VALUE_COLUMN_WIDTH: f32 = 16.24;
const SPACER_COLUMN_WIDTH: f32 = 2.56;

pub struct DetailedConjugation {
    sarf_terms: Vec<Option<SarfTerm>>,
}

impl DetailedConjugation {
    pub fn new(sarf_terms: Vec<Option<SarfTerm>>) -> Self {
        DetailedConjugation { sarf_terms }
    }

    pub fn from_sarf_kabeer(sarf_kabeer: &SarfKabeer) -> Self {
        Self::new(helper::from_sarf_kabeer(Some(sarf_kabeer)))
    }

    pub fn chart(&self) -> Result<Table, Error> {
        if self.sarf_terms.len() % 2 != 0 {
            return Err(Error::MalformedTerms { len: self.sarf_terms.len() });
        }

        let mut column_widths = vec![VALUE_COLUMN_WIDTH; COLUMNS as usize];
        column_widths[3] = SPACER_COLUMN_WIDTH;
        let mut table = Table { column_widths, rows: Vec::new() };

        let empty = SarfTerm::default();
        for pair in self.sarf_terms.chunks_exact(2) {
            let left = pair[0].as_ref().unwrap_or(&empty);
            add_conjugation_rows(&mut table.rows, pair[1].as_ref(), left);
        }
        table.rows.push(helper::separator_row(COLUMNS));

        log::debug!(
            "detailed table: {} term pairs, {} rows",
            self.sarf_terms.len() / 2,
            table.rows.len()
        );
        Ok(table)
    }
}

fn add_conjugation_rows(rows: &mut Vec<Row>, right: Option<&SarfTerm>, left: &SarfTerm) {
    // A right term without a type marks a one-sided pair.
    let right = right.filter(|term| term.term_type.is_some());
    let no_border = right.is_none();

    rows.push(caption_row(
        right.and_then(|t| t.label.as_ref()),
        left.label.as_ref(),
        no_border,
    ));

    let mut from = 0;
    while from < left.values.len() {
        let to = from + CHUNK;
        let right_chunk = right.map_or(&[][..], |t| slice(&t.values, from, to));
        rows.push(conjugation_row(right_chunk, slice(&left.values, from, to), no_border));
        from = to;
    }

    rows.push(helper::separator_row(COLUMNS));
}

fn slice(values: &[Option<ArabicWord>], from: usize, to: usize) -> &[Option<ArabicWord>] {
    let len = values.len();
    &values[from.min(len)..to.min(len)]
}

fn side_borders(no_border: bool) -> CellBorders {
    if no_border { CellBorders::Nil } else { CellBorders::Table }
}

fn spacer_cell() -> Cell {
    Cell::new(1, CellBorders::Nil, vec![helper::no_spacing_paragraph()])
}

fn caption_row(right: Option<&ArabicWord>, left: Option<&ArabicWord>, no_border: bool) -> Row {
    Row::new(vec![
        Cell::new(
            3,
            side_borders(no_border),
            vec![helper::arabic_term_paragraph(right, ARABIC_CAPTION_STYLE)],
        ),
        spacer_cell(),
        Cell::new(
            3,
            CellBorders::Table,
            vec![helper::arabic_term_paragraph(left, ARABIC_CAPTION_STYLE)],
        ),
    ])
}

/// Both sides are padded to three cells so every row fills the grid.
fn conjugation_row(
    right: &[Option<ArabicWord>],
    left: &[Option<ArabicWord>],
    no_border: bool,
) -> Row {
    let value_cell = |word: Option<&ArabicWord>, borders: CellBorders| {
        Cell::new(
            1,
            borders,
            vec![helper::arabic_term_paragraph(word, ARABIC_TABLE_CENTER_STYLE)],
        )
    };
    let padded = |values: &[Option<ArabicWord>], borders: CellBorders| -> Vec<Cell> {
        (0..CHUNK)
            .map(|i| value_cell(values.get(i).and_then(Option::as_ref), borders))
            .collect()
    };

    let mut cells = padded(right, side_borders(no_border));
    cells.push(spacer_cell());
    cells.extend(padded(left, CellBorders::Table));
    Row::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sarf::SarfTermType;

    fn term(term_type: Option<SarfTermType>, caption: &str, count: usize) -> SarfTerm {
        SarfTerm {
            term_type,
            label: Some(ArabicWord::new(caption)),
            values: (0..count)
                .map(|i| Some(ArabicWord::new(format!("{caption}{i}"))))
                .collect(),
        }
    }

    #[test]
    fn row_counts_follow_pairs_and_chunks() {
        // left values: 9 -> 3 rows, 4 -> 2 rows
        let terms = vec![
            Some(term(Some(SarfTermType::PresentTense), "L1", 9)),
            Some(term(Some(SarfTermType::PastTense), "R1", 9)),
            Some(term(Some(SarfTermType::VerbalNoun), "L2", 4)),
            Some(term(Some(SarfTermType::VerbalNoun), "R2", 4)),
        ];
        let table = DetailedConjugation::new(terms).chart().unwrap();
        // 2 captions + 5 value rows + 2 separators + 1 trailing separator
        assert_eq!(table.rows.len(), 10);
        assert!(table.rows.iter().all(|r| r.span() == COLUMNS));
        assert_eq!(table.columns(), 7);
    }

    #[test]
    fn right_term_is_second_of_pair() {
        let terms = vec![
            Some(term(Some(SarfTermType::PresentTense), "L", 3)),
            Some(term(Some(SarfTermType::PastTense), "R", 3)),
        ];
        let table = DetailedConjugation::new(terms).chart().unwrap();
        let caption = &table.rows[0];
        assert_eq!(caption.cells[0].paragraphs[0].text(), "R");
        assert_eq!(caption.cells[2].paragraphs[0].text(), "L");
        let values = &table.rows[1];
        assert_eq!(values.cells[0].paragraphs[0].text(), "R0");
        assert_eq!(values.cells[4].paragraphs[0].text(), "L0");
        assert_eq!(values.cells[3].borders, CellBorders::Nil);
    }

    #[test]
    fn one_sided_pair_has_blank_borderless_right() {
        let terms = vec![Some(term(Some(SarfTermType::NounOfPlaceAndTime), "L", 2)), None];
        let table = DetailedConjugation::new(terms).chart().unwrap();
        let caption = &table.rows[0];
        assert_eq!(caption.cells[0].borders, CellBorders::Nil);
        assert_eq!(caption.cells[0].paragraphs[0].text(), " ");
        let values = &table.rows[1];
        assert_eq!(values.cells.len(), 7);
        assert!(values.cells[..3].iter().all(|c| c.borders == CellBorders::Nil));
        assert_eq!(values.cells[6].paragraphs[0].text(), " ");
    }

    #[test]
    fn untyped_right_term_counts_as_absent() {
        let terms = vec![
            Some(term(Some(SarfTermType::Imperative), "L", 1)),
            Some(term(None, "R", 1)),
        ];
        let table = DetailedConjugation::new(terms).chart().unwrap();
        assert_eq!(table.rows[0].cells[0].borders, CellBorders::Nil);
        assert_eq!(table.rows[0].cells[0].paragraphs[0].text(), " ");
    }

    #[test]
    fn odd_term_count_is_rejected() {
        let terms = vec![Some(term(Some(SarfTermType::PastTense), "L", 3))];
        match DetailedConjugation::new(terms).chart() {
            Err(Error::MalformedTerms { len }) => assert_eq!(len, 1),
            other => panic!("expected MalformedTerms, got {other:?}"),
        }
    }

    #[test]
    fn empty_term_list_is_only_trailing_separator() {
        let table = DetailedConjugation::new(Vec::new()).chart().unwrap();
        assert_eq!(table.rows.len(), 1);
    }
}
