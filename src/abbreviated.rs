//! Abbreviated conjugation (Sarf Sagheer) table.

use crate::arabic::{ArabicWord, RootWord};
use crate::config::ChartConfiguration;
use crate::helper::{
    self, ARABIC_HEADING_STYLE, ARABIC_NORMAL_STYLE, ARABIC_TABLE_CENTER_STYLE, BuildContext,
    COMMAND_PREFIX, FORBIDDING_PREFIX, GEORGIA_FONTS, RFONTS_CS, SIZE_32, SIZE_56, ZARF_PREFIX,
};
use crate::model::{Alignment, Cell, CellBorders, Inline, Paragraph, Row, Run, RunProperties, Table};
use crate::sarf::{ConjugationHeader, SarfSagheer};

const COLUMNS: u32 = 4;

pub struct AbbreviatedConjugation<'a> {
    configuration: &'a ChartConfiguration,
    sarf_sagheer: &'a SarfSagheer,
    header: Option<&'a ConjugationHeader>,
}

impl<'a> AbbreviatedConjugation<'a> {
    pub fn new(
        configuration: &'a ChartConfiguration,
        sarf_sagheer: &'a SarfSagheer,
        header: Option<&'a ConjugationHeader>,
    ) -> Self {
        AbbreviatedConjugation { configuration, sarf_sagheer, header }
    }

    pub fn chart(&self, ctx: &mut BuildContext) -> Table {
        let mut table = Table::with_equal_columns(COLUMNS as usize);
        if !self.configuration.omit_title {
            table.rows.push(self.title_row(ctx));
        }
        if !self.configuration.omit_header {
            match self.header {
                Some(header) => table.rows.push(header_row(header)),
                None => log::debug!("chart has no header, skipping header row"),
            }
        }
        table.rows.extend(self.active_line_row());
        table.rows.extend(self.passive_line_row());
        table.rows.extend(self.command_line_row());
        table.rows.extend(self.zarf_line_row());
        table.rows.push(helper::separator_row(COLUMNS));
        table
    }

    fn title_row(&self, ctx: &mut BuildContext) -> Row {
        Row::new(vec![Cell::new(
            COLUMNS,
            CellBorders::Nil,
            vec![self.title_paragraph(ctx)],
        )])
    }

    /// Heading paragraph wrapped in a bookmark so the TOC can find it.
    fn title_paragraph(&self, ctx: &mut BuildContext) -> Paragraph {
        let id = ctx.next_bookmark_id();
        let title = helper::title_word(self.sarf_sagheer.active_line.as_ref());
        let mut p = Paragraph::styled(ARABIC_HEADING_STYLE);
        p.bidi = true;
        p.content = vec![
            Inline::BookmarkStart { id, name: helper::bookmark_name(id) },
            Inline::Run(Run::text(title.to_string(), helper::arabic_run_properties())),
            Inline::BookmarkEnd { id },
        ];
        p
    }

    fn active_line_row(&self) -> Option<Row> {
        let line = self.sarf_sagheer.active_line.as_ref()?;
        Some(line_row(
            line.active_participle_masculine.as_ref(),
            &helper::multi_root_word(&line.verbal_nouns),
            line.present_tense.as_ref(),
            line.past_tense.as_ref(),
        ))
    }

    fn passive_line_row(&self) -> Option<Row> {
        let line = self.sarf_sagheer.passive_line.as_ref()?;
        Some(line_row(
            line.passive_participle_masculine.as_ref(),
            &helper::multi_root_word(&line.verbal_nouns),
            line.present_passive_tense.as_ref(),
            line.past_passive_tense.as_ref(),
        ))
    }

    fn command_line_row(&self) -> Option<Row> {
        let line = self.sarf_sagheer.imperative_and_forbidding_line.as_ref()?;
        Some(Row::new(vec![
            Cell::new(
                2,
                CellBorders::Table,
                vec![arabic_text_paragraph(Some(&*FORBIDDING_PREFIX), label(line.forbidding.as_ref()))],
            ),
            Cell::new(
                2,
                CellBorders::Table,
                vec![arabic_text_paragraph(Some(&*COMMAND_PREFIX), label(line.imperative.as_ref()))],
            ),
        ]))
    }

    fn zarf_line_row(&self) -> Option<Row> {
        let line = self.sarf_sagheer.adverb_line.as_ref()?;
        let adverbs = helper::multi_root_word(&line.adverbs);
        Some(Row::new(vec![Cell::new(
            COLUMNS,
            CellBorders::Table,
            vec![arabic_text_paragraph(Some(&*ZARF_PREFIX), adverbs)],
        )]))
    }
}

fn label(word: Option<&RootWord>) -> ArabicWord {
    word.map_or_else(ArabicWord::space, |w| w.label().clone())
}

fn line_row(
    participle: Option<&RootWord>,
    verbal_nouns: &ArabicWord,
    present: Option<&RootWord>,
    past: Option<&RootWord>,
) -> Row {
    let cell = |word: ArabicWord| {
        Cell::new(1, CellBorders::Table, vec![arabic_text_paragraph(None, word)])
    };
    Row::new(vec![
        cell(label(participle)),
        cell(verbal_nouns.clone()),
        cell(label(present)),
        cell(label(past)),
    ])
}

fn arabic_text_paragraph(prefix: Option<&ArabicWord>, word: ArabicWord) -> Paragraph {
    let word = match prefix {
        Some(prefix) => prefix.concat_with_space(&word),
        None => word,
    };
    Paragraph::styled(ARABIC_TABLE_CENTER_STYLE)
        .add_run(Run::text(word.to_string(), helper::arabic_run_properties()))
}

fn header_row(header: &ConjugationHeader) -> Row {
    let labels = [&header.type_label1, &header.type_label2, &header.type_label3]
        .into_iter()
        .map(header_label_paragraph)
        .collect();
    Row::new(vec![
        Cell::new(
            2,
            CellBorders::Table,
            vec![root_words_paragraph(header), translation_paragraph(header)],
        ),
        Cell::new(2, CellBorders::Table, labels),
    ])
}

fn sized(size: u32) -> RunProperties {
    RunProperties { size: Some(size), ..Default::default() }
}

fn root_words_paragraph(header: &ConjugationHeader) -> Paragraph {
    let mut p = Paragraph::styled(ARABIC_NORMAL_STYLE);
    p.bidi = true;
    p.alignment = Some(Alignment::Center);
    p.mark_properties = sized(SIZE_56);
    p.add_run(Run::text(
        header.root_letters.display(),
        RunProperties { fonts: Some(RFONTS_CS), ..sized(SIZE_56) },
    ))
}

fn translation_paragraph(header: &ConjugationHeader) -> Paragraph {
    let text = header
        .translation
        .as_deref()
        .map(|t| format!("({t})"))
        .unwrap_or_default();
    let georgia = RunProperties { fonts: Some(GEORGIA_FONTS), ..Default::default() };
    let p = Paragraph {
        alignment: Some(Alignment::Center),
        mark_properties: georgia.clone(),
        ..Default::default()
    };
    p.add_run(Run::text(text, georgia))
}

fn header_label_paragraph(label: &ArabicWord) -> Paragraph {
    let mut p = Paragraph::styled(ARABIC_NORMAL_STYLE);
    p.bidi = true;
    p.mark_properties = sized(SIZE_32);
    p.add_run(Run::text(
        label.to_string(),
        RunProperties { fonts: Some(RFONTS_CS), ..sized(SIZE_32) },
    ))
}
