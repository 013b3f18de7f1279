//! The static package parts a minimal `.docx` needs around the converted
//! body: content types, relationships, a small style set, and a numbering
//! part generated from the registry's allocations.

use crate::numbering::ListDefinition;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Wrap converted body markup into a complete `word/document.xml`.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{NS_W}">
<w:body>{body}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body>
</w:document>"#
    )
}

pub fn content_types_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="{NS_CT}">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#
    )
}

pub fn rels_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{NS_RELS}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
    )
}

pub fn document_rels_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{NS_RELS}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#
    )
}

/// The paragraph styles the converter emits references to.
pub fn styles_xml() -> String {
    let mut styles = String::new();
    styles.push_str(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Paragraph">
    <w:name w:val="Paragraph"/>
    <w:basedOn w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:spacing w:after="120"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListParagraph">
    <w:name w:val="List Paragraph"/>
    <w:basedOn w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:ind w:left="720"/></w:pPr>
  </w:style>
"#,
    );
    for (level, size) in [(1u32, 32u32), (2, 28), (3, 24)] {
        styles.push_str(&format!(
            r#"  <w:style w:type="paragraph" w:styleId="Heading{level}">
    <w:name w:val="heading {level}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:keepLines/><w:spacing w:before="240" w:after="120"/></w:pPr>
    <w:rPr><w:b/><w:sz w:val="{size}"/></w:rPr>
  </w:style>
"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{NS_W}">
  {styles}</w:styles>"#
    )
}

/// One multi-level abstract numbering per registered definition, so every
/// nesting depth of a list tree indents under the same `numId`.
pub fn numbering_xml(definitions: &[ListDefinition]) -> String {
    let mut body = String::new();
    for definition in definitions {
        let abstract_id = definition.num_id - 1;
        body.push_str(&format!("<w:abstractNum w:abstractNumId=\"{abstract_id}\">"));
        for level in 0u32..9 {
            let indent = 720 * (level + 1);
            body.push_str(&format!(
                "<w:lvl w:ilvl=\"{level}\">\
                 <w:start w:val=\"1\"/>\
                 <w:numFmt w:val=\"bullet\"/>\
                 <w:lvlText w:val=\"\u{2022}\"/>\
                 <w:lvlJc w:val=\"left\"/>\
                 <w:pPr><w:ind w:left=\"{indent}\" w:hanging=\"360\"/></w:pPr>\
                 </w:lvl>"
            ));
        }
        body.push_str("</w:abstractNum>");
    }
    for definition in definitions {
        body.push_str(&format!(
            "<w:num w:numId=\"{}\"><w:abstractNumId w:val=\"{}\"/></w:num>",
            definition.num_id,
            definition.num_id - 1
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="{NS_W}">{body}</w:numbering>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_wrapper_embeds_the_body() {
        let xml = document_xml("<w:p/>");
        assert!(xml.contains("<w:body><w:p/><w:sectPr>"));
        assert!(xml.starts_with("<?xml"));
    }

    #[test]
    fn numbering_part_lists_every_definition() {
        let definitions = vec![
            ListDefinition {
                style: "ListParagraph".to_string(),
                num_id: 1,
            },
            ListDefinition {
                style: "ListParagraph".to_string(),
                num_id: 2,
            },
        ];
        let xml = numbering_xml(&definitions);
        assert!(xml.contains("<w:num w:numId=\"1\"><w:abstractNumId w:val=\"0\"/></w:num>"));
        assert!(xml.contains("<w:num w:numId=\"2\"><w:abstractNumId w:val=\"1\"/></w:num>"));
        assert_eq!(xml.matches("<w:abstractNum ").count(), 2);
        assert_eq!(xml.matches("<w:lvl ").count(), 18);
    }

    #[test]
    fn styles_cover_the_emitted_style_ids() {
        let xml = styles_xml();
        for id in ["Normal", "Paragraph", "ListParagraph", "Heading1", "Heading2", "Heading3"] {
            assert!(xml.contains(&format!("w:styleId=\"{id}\"")), "missing {id}");
        }
    }
}
