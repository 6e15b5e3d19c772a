use crate::model::{
    Alignment, Block, Cell, CellBorders, Document, FieldCharType, Inline, Paragraph, Row, Run,
    RunContent, RunFonts, RunProperties, SectionProperties, SectionType, Table, TabStop,
};

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// `w:tblW` in fiftieths of a percent.
const FULL_WIDTH_PCT: u32 = 5000;

pub fn render(doc: &Document) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(&format!(r#"<w:document xmlns:w="{WML_NS}"><w:body>"#));

    let text_width = doc.section.text_width();
    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => paragraph(&mut xml, p),
            Block::Table(t) => table(&mut xml, t, text_width),
        }
    }
    // Word refuses a body whose last block is a table.
    if matches!(doc.blocks.last(), Some(Block::Table(_))) {
        paragraph(&mut xml, &Paragraph::default());
    }

    section(&mut xml, &doc.section);
    xml.push_str("</w:body></w:document>");
    xml
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if is_xml_char(c) => out.push(c),
            // Not representable in XML 1.0; dropped.
            _ => {}
        }
    }
    out
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

fn on_off(xml: &mut String, tag: &str, on: bool) {
    if on {
        xml.push_str(&format!("<w:{tag}/>"));
    }
}

fn alignment_val(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

fn paragraph(xml: &mut String, p: &Paragraph) {
    xml.push_str("<w:p>");
    paragraph_properties(xml, p);
    for inline in &p.content {
        match inline {
            Inline::Run(r) => run(xml, r),
            Inline::BookmarkStart { id, name } => {
                xml.push_str(&format!(
                    r#"<w:bookmarkStart w:id="{id}" w:name="{}"/>"#,
                    escape_xml(name)
                ));
            }
            Inline::BookmarkEnd { id } => {
                xml.push_str(&format!(r#"<w:bookmarkEnd w:id="{id}"/>"#));
            }
        }
    }
    xml.push_str("</w:p>");
}

fn paragraph_properties(xml: &mut String, p: &Paragraph) {
    let empty = p.style.is_none()
        && p.tabs.is_empty()
        && !p.bidi
        && p.alignment.is_none()
        && p.mark_properties.is_empty()
        && p.section.is_none();
    if empty {
        return;
    }
    // Child order follows CT_PPr.
    xml.push_str("<w:pPr>");
    if let Some(style) = p.style {
        xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(style)));
    }
    if !p.tabs.is_empty() {
        xml.push_str("<w:tabs>");
        for tab in &p.tabs {
            tab_stop(xml, tab);
        }
        xml.push_str("</w:tabs>");
    }
    on_off(xml, "bidi", p.bidi);
    if let Some(alignment) = p.alignment {
        xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment_val(alignment)));
    }
    if !p.mark_properties.is_empty() {
        run_properties(xml, &p.mark_properties);
    }
    if let Some(sect) = &p.section {
        section(xml, sect);
    }
    xml.push_str("</w:pPr>");
}

fn tab_stop(xml: &mut String, tab: &TabStop) {
    let leader = if tab.dot_leader { r#" w:leader="dot""# } else { "" };
    xml.push_str(&format!(
        r#"<w:tab w:val="{}"{leader} w:pos="{}"/>"#,
        alignment_val(tab.alignment),
        tab.position
    ));
}

fn run_fonts(xml: &mut String, fonts: &RunFonts) {
    xml.push_str("<w:rFonts");
    if let Some(ascii) = fonts.ascii {
        xml.push_str(&format!(r#" w:ascii="{ascii}""#));
    }
    if let Some(h_ansi) = fonts.h_ansi {
        xml.push_str(&format!(r#" w:hAnsi="{h_ansi}""#));
    }
    if let Some(theme) = fonts.east_asia_theme {
        xml.push_str(&format!(r#" w:eastAsiaTheme="{theme}""#));
    }
    if fonts.complex_script_hint {
        xml.push_str(r#" w:hint="cs""#);
    }
    xml.push_str("/>");
}

fn run_properties(xml: &mut String, props: &RunProperties) {
    // Child order follows CT_RPr.
    xml.push_str("<w:rPr>");
    if let Some(fonts) = &props.fonts {
        run_fonts(xml, fonts);
    }
    on_off(xml, "noProof", props.no_proof);
    if let Some(size) = props.size {
        xml.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
    }
    on_off(xml, "rtl", props.rtl);
    if let Some(lang) = props.lang {
        xml.push_str(&format!(r#"<w:lang w:val="{lang}"/>"#));
    }
    xml.push_str("</w:rPr>");
}

fn run(xml: &mut String, r: &Run) {
    xml.push_str("<w:r>");
    if !r.properties.is_empty() {
        run_properties(xml, &r.properties);
    }
    match &r.content {
        RunContent::Text(text) => {
            xml.push_str(&format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(text)));
        }
        RunContent::FieldChar { kind, dirty } => {
            let kind = match kind {
                FieldCharType::Begin => "begin",
                FieldCharType::Separate => "separate",
                FieldCharType::End => "end",
            };
            let dirty = if *dirty { r#" w:dirty="true""# } else { "" };
            xml.push_str(&format!(r#"<w:fldChar w:fldCharType="{kind}"{dirty}/>"#));
        }
        RunContent::InstrText(instruction) => {
            xml.push_str(&format!(
                r#"<w:instrText xml:space="preserve">{}</w:instrText>"#,
                escape_xml(instruction)
            ));
        }
    }
    xml.push_str("</w:r>");
}

fn table(xml: &mut String, t: &Table, text_width: u32) {
    xml.push_str("<w:tbl><w:tblPr>");
    xml.push_str(&format!(r#"<w:tblW w:w="{FULL_WIDTH_PCT}" w:type="pct"/>"#));
    xml.push_str("<w:tblBorders>");
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        xml.push_str(&format!(
            r#"<w:{edge} w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#
        ));
    }
    xml.push_str(r#"</w:tblBorders><w:tblLayout w:type="fixed"/></w:tblPr>"#);

    let twips: Vec<u32> = t
        .column_widths
        .iter()
        .map(|pct| (pct / 100.0 * text_width as f32).round() as u32)
        .collect();
    xml.push_str("<w:tblGrid>");
    for w in &twips {
        xml.push_str(&format!(r#"<w:gridCol w:w="{w}"/>"#));
    }
    xml.push_str("</w:tblGrid>");

    for r in &t.rows {
        row(xml, r, &twips);
    }
    xml.push_str("</w:tbl>");
}

fn row(xml: &mut String, r: &Row, grid: &[u32]) {
    xml.push_str("<w:tr>");
    let mut column = 0usize;
    for c in &r.cells {
        let span = c.grid_span.max(1) as usize;
        let end = (column + span).min(grid.len());
        let width: u32 = grid[column.min(end)..end].iter().sum();
        cell(xml, c, width);
        column += span;
    }
    xml.push_str("</w:tr>");
}

fn cell(xml: &mut String, c: &Cell, width: u32) {
    xml.push_str("<w:tc><w:tcPr>");
    xml.push_str(&format!(r#"<w:tcW w:w="{width}" w:type="dxa"/>"#));
    if c.grid_span > 1 {
        xml.push_str(&format!(r#"<w:gridSpan w:val="{}"/>"#, c.grid_span));
    }
    if c.borders == CellBorders::Nil {
        xml.push_str("<w:tcBorders>");
        for edge in ["top", "left", "bottom", "right"] {
            xml.push_str(&format!(r#"<w:{edge} w:val="nil"/>"#));
        }
        xml.push_str("</w:tcBorders>");
    }
    xml.push_str("</w:tcPr>");
    if c.paragraphs.is_empty() {
        paragraph(xml, &Paragraph::default());
    }
    for p in &c.paragraphs {
        paragraph(xml, p);
    }
    xml.push_str("</w:tc>");
}

fn section(xml: &mut String, sect: &SectionProperties) {
    // Child order follows CT_SectPr.
    xml.push_str("<w:sectPr>");
    if let Some(kind) = sect.section_type {
        let val = match kind {
            SectionType::Continuous => "continuous",
        };
        xml.push_str(&format!(r#"<w:type w:val="{val}"/>"#));
    }
    xml.push_str(&format!(
        r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
        sect.page_width, sect.page_height
    ));
    xml.push_str(&format!(
        r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="{hf}" w:footer="{hf}" w:gutter="{g}"/>"#,
        m = sect.margin,
        hf = sect.header_footer,
        g = sect.gutter
    ));
    match sect.columns {
        Some(num) => {
            xml.push_str(&format!(r#"<w:cols w:num="{num}" w:space="{}"/>"#, sect.column_space));
        }
        None => {
            xml.push_str(&format!(r#"<w:cols w:space="{}"/>"#, sect.column_space));
        }
    }
    xml.push_str(&format!(r#"<w:docGrid w:linePitch="{}"/>"#, sect.line_pitch));
    xml.push_str("</w:sectPr>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper;

    fn parse_ok(xml: &str) -> roxmltree::Document<'_> {
        roxmltree::Document::parse(xml).expect("rendered XML must be well-formed")
    }

    #[test]
    fn empty_document_has_body_and_section() {
        let xml = render(&Document::default());
        let doc = parse_ok(&xml);
        let body = doc
            .descendants()
            .find(|n| n.has_tag_name((WML_NS, "body")))
            .unwrap();
        let last = body.children().filter(|n| n.is_element()).last().unwrap();
        assert!(last.has_tag_name((WML_NS, "sectPr")));
    }

    #[test]
    fn text_is_escaped() {
        let mut doc = Document::default();
        doc.add_paragraph(Paragraph::default().add_run(Run::text("a < b & c", RunProperties::default())));
        let xml = render(&doc);
        assert!(xml.contains("a &lt; b &amp; c"));
        parse_ok(&xml);
    }

    #[test]
    fn characters_outside_xml_are_dropped() {
        let mut doc = Document::default();
        doc.add_paragraph(Paragraph::default().add_run(Run::text(
            "نَصَرَ\u{0001}\u{FFFE}\u{FFFF}\u{000B}\tx",
            helper::arabic_run_properties(),
        )));
        let xml = render(&doc);
        let parsed = parse_ok(&xml);
        let text: String = parsed
            .descendants()
            .filter(|n| n.has_tag_name((WML_NS, "t")))
            .filter_map(|n| n.text())
            .collect();
        assert_eq!(text, "نَصَرَ\tx");
    }

    #[test]
    fn trailing_table_gets_closing_paragraph() {
        let mut doc = Document::default();
        let mut table = Table::with_equal_columns(4);
        table.rows.push(helper::separator_row(4));
        doc.add_table(table);
        let xml = render(&doc);
        let parsed = parse_ok(&xml);
        let body = parsed
            .descendants()
            .find(|n| n.has_tag_name((WML_NS, "body")))
            .unwrap();
        let names: Vec<&str> = body
            .children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name())
            .collect();
        assert_eq!(names, vec!["tbl", "p", "sectPr"]);
    }

    #[test]
    fn nil_borders_and_spans_are_written() {
        let mut doc = Document::default();
        let mut table = Table::with_equal_columns(4);
        table.rows.push(helper::separator_row(4));
        doc.add_table(table);
        let xml = render(&doc);
        assert!(xml.contains(r#"<w:gridSpan w:val="4"/>"#));
        assert!(xml.contains(r#"<w:top w:val="nil"/>"#));
        // full text width 12240 - 2 * 1440
        assert!(xml.contains(r#"<w:tcW w:w="9360" w:type="dxa"/>"#));
    }

    #[test]
    fn rtl_run_properties() {
        let mut doc = Document::default();
        doc.add_paragraph(
            Paragraph::styled(helper::ARABIC_TABLE_CENTER_STYLE)
                .add_run(Run::text("نَصَرَ", helper::arabic_run_properties())),
        );
        let xml = render(&doc);
        assert!(xml.contains(r#"<w:rPr><w:rFonts w:hint="cs"/><w:rtl/></w:rPr>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Arabic-Table-Center"/>"#));
    }
}
