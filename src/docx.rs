use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Error;
use crate::helper::REQUIRED_STYLES;
use crate::model::Document;
use crate::wml::{self, WML_NS};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/>
</Relationships>"#;

/// Asks Word to refresh fields (the TOC) when the file is opened.
const SETTINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:updateFields w:val="true"/>
  <w:defaultTabStop w:val="720"/>
  <w:compat/>
</w:settings>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Traditional Arabic"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US" w:bidi="ar-SA"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="NoSpacing">
    <w:name w:val="No Spacing"/>
    <w:qFormat/>
    <w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Arabic-Normal">
    <w:name w:val="Arabic-Normal"/>
    <w:basedOn w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:bidi/><w:spacing w:after="0"/></w:pPr>
    <w:rPr><w:rFonts w:cs="Traditional Arabic"/><w:sz w:val="40"/><w:szCs w:val="40"/><w:rtl/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Arabic-Table-Center">
    <w:name w:val="Arabic-Table-Center"/>
    <w:basedOn w:val="Arabic-Normal"/>
    <w:qFormat/>
    <w:pPr><w:jc w:val="center"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Arabic-Caption">
    <w:name w:val="Arabic-Caption"/>
    <w:basedOn w:val="Arabic-Table-Center"/>
    <w:qFormat/>
    <w:rPr><w:b/><w:bCs/><w:color w:val="1F3864"/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Arabic-Heading1">
    <w:name w:val="Arabic-Heading1"/>
    <w:basedOn w:val="Arabic-Normal"/>
    <w:next w:val="Arabic-Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:jc w:val="center"/><w:outlineLvl w:val="0"/></w:pPr>
    <w:rPr><w:b/><w:bCs/><w:sz w:val="48"/><w:szCs w:val="48"/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="TOC1">
    <w:name w:val="toc 1"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="39"/>
    <w:pPr><w:bidi/><w:spacing w:after="100"/></w:pPr>
    <w:rPr><w:rFonts w:cs="Traditional Arabic"/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr>
  </w:style>
</w:styles>"#;

/// Writes `doc` as a DOCX package. The style sheet comes from `template`
/// when given, otherwise the built-in one is used.
pub fn write(path: &Path, doc: &Document, template: Option<&Path>) -> Result<(), Error> {
    let styles = match template {
        Some(template) => template_styles(template)?,
        None => STYLES_XML.to_string(),
    };
    let document_xml = wml::render(doc);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, &str); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", RELS_XML),
        ("word/document.xml", &document_xml),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ("word/styles.xml", &styles),
        ("word/settings.xml", SETTINGS_XML),
    ];
    for (name, content) in parts {
        zip.start_file(name, opt)?;
        zip.write_all(content.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

/// Reads `word/styles.xml` from a template package and warns about chart
/// styles it does not define.
pub fn template_styles(template: &Path) -> Result<String, Error> {
    let file = File::open(template)?;
    let mut zip = zip::ZipArchive::new(file)?;

    let mut xml_content = String::new();
    let Ok(mut entry) = zip.by_name("word/styles.xml") else {
        return Err(Error::Template(format!(
            "{} has no word/styles.xml",
            template.display()
        )));
    };
    entry.read_to_string(&mut xml_content)?;

    let defined = style_ids(&xml_content)?;
    for style in REQUIRED_STYLES {
        if !defined.contains(style) {
            log::warn!(
                "Template {} does not define paragraph style {style}",
                template.display()
            );
        }
    }
    Ok(xml_content)
}

/// Paragraph style ids declared in a `styles.xml` part.
pub fn style_ids(styles_xml: &str) -> Result<HashSet<String>, Error> {
    let xml = roxmltree::Document::parse(styles_xml)?;
    let root = xml.root_element();
    Ok(root
        .children()
        .filter(|n| n.tag_name().name() == "style" && n.tag_name().namespace() == Some(WML_NS))
        .filter(|n| n.attribute((WML_NS, "type")) == Some("paragraph"))
        .filter_map(|n| n.attribute((WML_NS, "styleId")))
        .map(str::to_string)
        .collect())
}
