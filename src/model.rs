//! WordprocessingML document model.
//!
//! Tables are plain values: a list of rows, each a list of cells with their
//! span, borders and paragraphs. Builders assemble them functionally and
//! [`crate::wml`] renders the whole tree in one pass.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub section: SectionProperties,
}

impl Document {
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SectionType {
    Continuous,
}

/// Measurements are in twips.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionProperties {
    pub section_type: Option<SectionType>,
    pub page_width: u32,
    pub page_height: u32,
    pub margin: u32,
    pub header_footer: u32,
    pub gutter: u32,
    pub columns: Option<u32>,
    pub column_space: u32,
    pub line_pitch: u32,
}

impl Default for SectionProperties {
    fn default() -> Self {
        SectionProperties {
            section_type: None,
            page_width: 12240,
            page_height: 15840,
            margin: 1440,
            header_footer: 708,
            gutter: 0,
            columns: None,
            column_space: 708,
            line_pitch: 360,
        }
    }
}

impl SectionProperties {
    pub fn continuous(columns: Option<u32>) -> Self {
        SectionProperties {
            section_type: Some(SectionType::Continuous),
            columns,
            ..Default::default()
        }
    }

    pub fn text_width(&self) -> u32 {
        self.page_width.saturating_sub(2 * self.margin)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TabStop {
    pub alignment: Alignment,
    pub dot_leader: bool,
    pub position: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunFonts {
    pub ascii: Option<&'static str>,
    pub h_ansi: Option<&'static str>,
    pub complex_script_hint: bool,
    pub east_asia_theme: Option<&'static str>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunProperties {
    pub fonts: Option<RunFonts>,
    pub no_proof: bool,
    /// Half-points, applied to both `sz` and `szCs`.
    pub size: Option<u32>,
    pub rtl: bool,
    pub lang: Option<&'static str>,
}

impl RunProperties {
    pub fn is_empty(&self) -> bool {
        *self == RunProperties::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldCharType {
    Begin,
    Separate,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RunContent {
    Text(String),
    FieldChar { kind: FieldCharType, dirty: bool },
    InstrText(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub properties: RunProperties,
    pub content: RunContent,
}

impl Run {
    pub fn text(text: impl Into<String>, properties: RunProperties) -> Self {
        Run { properties, content: RunContent::Text(text.into()) }
    }

    pub fn field_char(kind: FieldCharType, dirty: bool) -> Self {
        Run {
            properties: RunProperties::default(),
            content: RunContent::FieldChar { kind, dirty },
        }
    }

    pub fn instr_text(instruction: impl Into<String>) -> Self {
        Run {
            properties: RunProperties::default(),
            content: RunContent::InstrText(instruction.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Inline {
    Run(Run),
    BookmarkStart { id: u32, name: String },
    BookmarkEnd { id: u32 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paragraph {
    pub style: Option<&'static str>,
    pub tabs: Vec<TabStop>,
    pub bidi: bool,
    pub alignment: Option<Alignment>,
    /// Paragraph mark run properties.
    pub mark_properties: RunProperties,
    pub section: Option<SectionProperties>,
    pub content: Vec<Inline>,
}

impl Paragraph {
    pub fn styled(style: &'static str) -> Self {
        Paragraph { style: Some(style), ..Default::default() }
    }

    pub fn add_run(mut self, run: Run) -> Self {
        self.content.push(Inline::Run(run));
        self
    }

    /// Concatenated text of all text runs.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|inline| match inline {
                Inline::Run(Run { content: RunContent::Text(t), .. }) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellBorders {
    /// Inherit the table borders.
    Table,
    /// All four edges suppressed.
    Nil,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub grid_span: u32,
    pub borders: CellBorders,
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn new(grid_span: u32, borders: CellBorders, paragraphs: Vec<Paragraph>) -> Self {
        Cell { grid_span, borders, paragraphs }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row { cells }
    }

    pub fn span(&self) -> u32 {
        self.cells.iter().map(|c| c.grid_span).sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// Column widths as percentages of the text width.
    pub column_widths: Vec<f32>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn with_equal_columns(columns: usize) -> Self {
        let width = 100.0 / columns as f32;
        Table { column_widths: vec![width; columns], rows: Vec::new() }
    }

    pub fn columns(&self) -> usize {
        self.column_widths.len()
    }
}
