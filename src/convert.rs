//! The conversion driver: block-level dispatch over the builder's work
//! stack, plus the recursive inline-run extractor.

use markup5ever_rcdom::{Handle, NodeData};

use crate::ast::{Collection, ListParagraph, Node, Paragraph, Root, Text};
use crate::builder::AstBuilder;
use crate::dom;
use crate::error::ConvertError;
use crate::format::TextFormat;
use crate::numbering::{ListDefinition, NumberingRegistry};
use crate::visitor::TrailingNewlineRemover;

/// Converts HTML fragments into WordprocessingML body markup.
///
/// Supported block elements: `div`, `p`, `h<N>`, `ul`, `ol`, `li`. Supported
/// inline elements: `br`, `strong`/`b`, `em`/`i`, `u`, `sub`, `sup`/`super`,
/// `span`. Anything else fails the whole conversion.
pub struct HtmlConverter<R: NumberingRegistry> {
    registry: R,
}

impl<R: NumberingRegistry> HtmlConverter<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Full conversion: build, clean, render.
    pub fn process(&mut self, input: &str) -> Result<String, ConvertError> {
        Ok(self.processed_tree(input)?.render())
    }

    /// The tree as rendered by `process`: built and cleaned of trailing
    /// line breaks.
    pub fn processed_tree(&mut self, input: &str) -> Result<Root, ConvertError> {
        let mut root = self.build_tree(input)?;
        root.accept_mut(&mut TrailingNewlineRemover);
        Ok(root)
    }

    /// The raw tree, before cleanup.
    pub fn build_tree(&mut self, input: &str) -> Result<Root, ConvertError> {
        // `_dom` keeps the parsed document alive until conversion finishes;
        // see `dom::parse_fragment` for why the handles need it.
        let (_dom, children) = dom::parse_fragment(input);
        let mut run = ConvertRun {
            builder: AstBuilder::new(children),
            definition: None,
            registry: &mut self.registry,
        };
        while !run.builder.done() {
            run.next_paragraph()?;
        }
        Ok(run.builder.into_root())
    }
}

/// Per-call state: the work stack and the numbering definition of the list
/// tree currently being processed.
struct ConvertRun<'a, R: NumberingRegistry> {
    builder: AstBuilder,
    definition: Option<ListDefinition>,
    registry: &'a mut R,
}

impl<R: NumberingRegistry> ConvertRun<'_, R> {
    fn next_paragraph(&mut self) -> Result<(), ConvertError> {
        let Some(node) = self.builder.next() else {
            return Ok(());
        };
        let Some(name) = dom::element_name(&node) else {
            if matches!(node.data, NodeData::Text { .. }) {
                // Text at block position carries no paragraph content.
                return Ok(());
            }
            return Err(ConvertError::UnsupportedElement(dom::node_label(&node)));
        };

        match name.as_str() {
            "div" => self.emit_paragraph("Normal", &node),
            "p" => self.emit_paragraph("Paragraph", &node),
            "ul" | "ol" => {
                self.builder.new_layer(true);
                // One numbering definition per outermost list tree; nested
                // levels reuse it and only the indent level grows.
                if !self.builder.nested() {
                    self.definition = Some(self.registry.register("ListParagraph"));
                }
                self.builder.push_all(dom::node_children(&node));
                Ok(())
            }
            "li" => {
                self.builder.new_layer(false);
                let definition = self
                    .definition
                    .clone()
                    .ok_or(ConvertError::ListItemOutsideList)?;
                let runs = self.extract(&dom::node_children(&node), &TextFormat::default())?;
                let indent_level = self.builder.indent_level();
                self.builder.emit(Node::ListParagraph(ListParagraph::new(
                    &definition.style,
                    runs,
                    definition.num_id,
                    indent_level,
                )));
                Ok(())
            }
            other => match heading_level(other) {
                Some(level) => self.emit_paragraph(&format!("Heading{level}"), &node),
                None => Err(ConvertError::UnsupportedElement(other.to_string())),
            },
        }
    }

    fn emit_paragraph(&mut self, style: &str, node: &Handle) -> Result<(), ConvertError> {
        self.builder.new_layer(false);
        let runs = self.extract(&dom::node_children(node), &TextFormat::default())?;
        self.builder
            .emit(Node::Paragraph(Paragraph::new(style, runs)));
        Ok(())
    }

    /// Recursive inline extraction. Formatting accumulates downward through
    /// value-preserving toggles; block elements found here are pushed back
    /// onto the builder and contribute no run at this position.
    fn extract(
        &mut self,
        nodes: &[Handle],
        format: &TextFormat,
    ) -> Result<Collection, ConvertError> {
        let mut runs = Collection::default();
        for node in nodes {
            let mut node_format = format.clone();
            if let Some(style) = dom::attr(node, "style") {
                apply_style_declarations(&mut node_format, &style);
            }

            match &node.data {
                NodeData::Text { contents } => runs.push(Node::Text(Text::new(
                    contents.borrow().to_string(),
                    node_format,
                ))),
                NodeData::Element { name, .. } => {
                    let children = dom::node_children(node);
                    match name.local.to_string().as_str() {
                        "br" => runs.push(Node::Newline),
                        "strong" | "b" => {
                            self.extract_into(&mut runs, &children, &node_format.with_bold())?
                        }
                        "em" | "i" => {
                            self.extract_into(&mut runs, &children, &node_format.with_italic())?
                        }
                        "u" => {
                            self.extract_into(&mut runs, &children, &node_format.with_underline())?
                        }
                        "sub" => {
                            self.extract_into(&mut runs, &children, &node_format.with_subscript())?
                        }
                        "sup" | "super" => self.extract_into(
                            &mut runs,
                            &children,
                            &node_format.with_superscript(),
                        )?,
                        "span" => self.extract_into(&mut runs, &children, &node_format)?,
                        tag if is_block_name(tag) => {
                            // Block element inside inline content: hand it to
                            // the builder to become a later sibling paragraph.
                            self.builder.push(node.clone());
                        }
                        tag => return Err(ConvertError::UnsupportedElement(tag.to_string())),
                    }
                }
                _ => return Err(ConvertError::UnsupportedElement(dom::node_label(node))),
            }
        }
        Ok(runs)
    }

    fn extract_into(
        &mut self,
        runs: &mut Collection,
        nodes: &[Handle],
        format: &TextFormat,
    ) -> Result<(), ConvertError> {
        for node in self.extract(nodes, format)?.into_nodes() {
            runs.push(node);
        }
        Ok(())
    }
}

fn heading_level(name: &str) -> Option<&str> {
    let digits = name.strip_prefix('h')?;
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

fn is_block_name(name: &str) -> bool {
    matches!(name, "ul" | "ol" | "p" | "div") || heading_level(name).is_some()
}

/// Apply `;`-separated `property:value` declarations from a `style`
/// attribute. Unknown properties and declarations missing their value half
/// are ignored, one declaration at a time.
fn apply_style_declarations(format: &mut TextFormat, style: &str) {
    for declaration in style.split(';') {
        let mut halves = declaration.splitn(2, ':');
        let (Some(property), Some(value)) = (halves.next(), halves.next()) else {
            continue;
        };
        match property.trim() {
            "color" => format.set_color(&strip_hex(value)),
            "background-color" => {
                if let Ok(rgb) = u32::from_str_radix(&strip_hex(value), 16) {
                    format.set_highlight(highlight_name(rgb));
                }
            }
            "font-family" => format.set_font_family(value.trim()),
            _ => {}
        }
    }
}

fn strip_hex(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '#' | ' ' | ';')).collect()
}

// Fifteen inclusive [low, high] buckets; boundaries are shared between
// neighbors and the first match in ascending order wins. Everything above
// the last boundary is white.
const HIGHLIGHT_BUCKETS: [(u32, u32, &str); 15] = [
    (0x000000, 0x000080, "black"),
    (0x000080, 0x0000FF, "darkblue"),
    (0x0000FF, 0x008000, "blue"),
    (0x008000, 0x008080, "darkGreen"),
    (0x008080, 0x00FF00, "darkCyan"),
    (0x00FF00, 0x00FFFF, "green"),
    (0x00FFFF, 0x800000, "cyan"),
    (0x800000, 0x800080, "darkRed"),
    (0x800080, 0x808000, "darkMagenta"),
    (0x808000, 0x808080, "darkYellow"),
    (0x808080, 0xC0C0C0, "darkGray"),
    (0xC0C0C0, 0xFF0000, "lightGray"),
    (0xFF0000, 0xFF00FF, "red"),
    (0xFF00FF, 0xFFFF00, "magenta"),
    (0xFFFF00, 0xFFFFFF, "yellow"),
];

/// Map a 24-bit color to the nearest of the sixteen fixed highlight names.
pub fn highlight_name(rgb: u32) -> &'static str {
    for (low, high, name) in HIGHLIGHT_BUCKETS {
        if rgb >= low && rgb <= high {
            return name;
        }
    }
    "white"
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use regex::Regex;

    use super::*;
    use crate::numbering::Numbering;

    fn convert(input: &str) -> Result<Root, ConvertError> {
        HtmlConverter::new(Numbering::new()).processed_tree(input)
    }

    fn render(input: &str) -> String {
        HtmlConverter::new(Numbering::new()).process(input).unwrap()
    }

    #[test]
    fn paragraph_with_bold_run() {
        let root = convert("<p>Hello <b>world</b></p>").unwrap();
        let Node::Paragraph(para) = &root.nodes()[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(para.style, "Paragraph");
        let runs = para.runs.nodes();
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[0],
            Node::Text(Text::new("Hello ".to_string(), TextFormat::default()))
        );
        assert_eq!(
            runs[1],
            Node::Text(Text::new("world".to_string(), TextFormat::default().with_bold()))
        );
    }

    #[test]
    fn div_maps_to_normal_and_headings_keep_their_level() {
        let root = convert("<div>a</div><h2>b</h2>").unwrap();
        let styles: Vec<String> = root
            .nodes()
            .iter()
            .map(|n| match n {
                Node::Paragraph(p) => p.style.clone(),
                other => panic!("unexpected node {other}"),
            })
            .collect();
        assert_eq!(styles, ["Normal", "Heading2"]);
    }

    #[test]
    fn flat_list_shares_one_definition_at_level_zero() {
        let root = convert("<ul><li>a</li><li>b</li></ul>").unwrap();
        let items: Vec<&ListParagraph> = root
            .nodes()
            .iter()
            .filter_map(|n| match n {
                Node::ListParagraph(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(items.len(), 2);
        for item in &items {
            assert_eq!(item.num_id, 1);
            assert_eq!(item.indent_level, 0);
            assert_eq!(item.style, "ListParagraph");
        }
    }

    #[test]
    fn nested_list_reuses_the_definition_and_indents() {
        let root = convert("<ul><li>a<ol><li>b</li></ol></li></ul>").unwrap();
        let items: Vec<&ListParagraph> = root
            .nodes()
            .iter()
            .filter_map(|n| match n {
                Node::ListParagraph(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].indent_level, 0);
        assert_eq!(items[1].indent_level, 1);
        assert_eq!(items[0].num_id, items[1].num_id);
    }

    #[test]
    fn two_sibling_lists_get_distinct_definitions() {
        let root = convert("<ul><li>a</li></ul><ol><li>b</li></ol>").unwrap();
        let ids: Vec<u32> = root
            .nodes()
            .iter()
            .filter_map(|n| match n {
                Node::ListParagraph(p) => Some(p.num_id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn block_element_inside_a_div_becomes_a_sibling() {
        let root = convert("<div>before<p>after</p></div>").unwrap();
        let descriptions = root.grep(&Regex::new("^<Paragraph").unwrap());
        assert_eq!(descriptions.len(), 2);
        assert!(descriptions[0].contains("{Normal}"));
        assert!(descriptions[0].contains("before"));
        assert!(descriptions[1].contains("{Paragraph}"));
        assert!(descriptions[1].contains("after"));
    }

    #[test]
    fn list_discovered_in_inline_content_is_deferred() {
        let root = convert("<div>intro<ul><li>x</li></ul></div>").unwrap();
        let kinds: Vec<&str> = root
            .nodes()
            .iter()
            .map(|n| match n {
                Node::Paragraph(_) => "p",
                Node::ListParagraph(_) => "li",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["p", "li"]);
    }

    #[test]
    fn unsupported_block_element_is_fatal() {
        let err = convert("<table><tr><td>x</td></tr></table>").unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedElement(ref name) if name == "table"));
    }

    #[test]
    fn unsupported_inline_element_is_fatal() {
        let err = convert("<p>a<video>b</video></p>").unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedElement(ref name) if name == "video"));
    }

    #[test]
    fn text_at_block_position_is_skipped() {
        let root = convert("stray<p>kept</p>").unwrap();
        assert_eq!(root.nodes().len(), 1);
    }

    #[test]
    fn inline_styles_set_color_highlight_and_font() {
        let root = convert(
            r#"<p><span style="color: #FF0000; background-color: #00ff01; font-family: Arial">x</span></p>"#,
        )
        .unwrap();
        let Node::Paragraph(para) = &root.nodes()[0] else {
            panic!("expected paragraph");
        };
        let Node::Text(text) = &para.runs.nodes()[0] else {
            panic!("expected text run");
        };
        assert_eq!(text.format.to_string(), "color FF0000|highlight green|font_family Arial");
    }

    #[test]
    fn malformed_style_declarations_are_ignored() {
        let root =
            convert(r#"<p><span style="color; font-family: Courier;;">x</span></p>"#).unwrap();
        let Node::Paragraph(para) = &root.nodes()[0] else {
            panic!("expected paragraph");
        };
        let Node::Text(text) = &para.runs.nodes()[0] else {
            panic!("expected text run");
        };
        assert_eq!(text.format.to_string(), "font_family Courier");
    }

    #[test]
    fn nested_inline_formatting_accumulates() {
        let rendered = render("<p><b><i>x</i></b></p>");
        assert!(rendered.contains("<w:rPr><w:b /><w:i /></w:rPr>"));
    }

    #[test]
    fn sup_and_super_both_mean_superscript() {
        for tag in ["sup", "super"] {
            let rendered = render(&format!("<p><{tag}>2</{tag}></p>"));
            assert!(rendered.contains("w:val=\"superscript\""), "tag {tag}");
        }
    }

    #[test]
    fn trailing_breaks_are_cleaned_before_render() {
        let rendered = render("<p>a<br/><br/></p>");
        assert!(!rendered.contains("<w:br/>"));
        assert!(rendered.contains(">a</w:t>"));
    }

    #[test]
    fn process_is_deterministic() {
        let input = "<ul><li>a<ol><li><b>b</b></li></ol></li></ul><p>c</p>";
        assert_eq!(render(input), render(input));
    }

    #[test]
    fn highlight_boundaries_resolve_to_the_lower_bucket() {
        assert_eq!(highlight_name(0x000000), "black");
        assert_eq!(highlight_name(0x000080), "black");
        assert_eq!(highlight_name(0x000081), "darkblue");
        assert_eq!(highlight_name(0x0000FF), "darkblue");
        assert_eq!(highlight_name(0x008000), "blue");
        assert_eq!(highlight_name(0x00FF00), "darkCyan");
        assert_eq!(highlight_name(0x00FFFF), "green");
        assert_eq!(highlight_name(0x800000), "cyan");
        assert_eq!(highlight_name(0x808080), "darkYellow");
        assert_eq!(highlight_name(0xC0C0C0), "darkGray");
        assert_eq!(highlight_name(0xFF0000), "lightGray");
        assert_eq!(highlight_name(0xFF00FF), "red");
        assert_eq!(highlight_name(0xFFFF00), "magenta");
        assert_eq!(highlight_name(0xFFFFFF), "yellow");
        assert_eq!(highlight_name(0xFFFFFF + 1), "white");
    }

    #[test]
    fn highlight_mapping_is_total() {
        let names = [
            "black",
            "darkblue",
            "blue",
            "darkGreen",
            "darkCyan",
            "green",
            "cyan",
            "darkRed",
            "darkMagenta",
            "darkYellow",
            "darkGray",
            "lightGray",
            "red",
            "magenta",
            "yellow",
            "white",
        ];
        for rgb in (0x000000..=0xFFFFFFu32).step_by(257) {
            assert!(names.contains(&highlight_name(rgb)), "no bucket for {rgb:#08x}");
        }
    }
}
