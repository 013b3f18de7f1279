use std::fmt;

/// Inline run styling carried through the inline extractor.
///
/// The `with_*` toggles are value-preserving: they return a new format and
/// leave the receiver untouched, so a nested element never contaminates its
/// parent's state. The `set_*` methods mutate and are only ever applied to a
/// working clone made for a single element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextFormat {
    bold: bool,
    italic: bool,
    underline: bool,
    subscript: bool,
    superscript: bool,
    color: Option<String>,
    highlight: Option<String>,
    font_family: Option<String>,
    font_size: Option<u32>,
}

impl TextFormat {
    pub fn with_bold(&self) -> Self {
        Self {
            bold: true,
            ..self.clone()
        }
    }

    pub fn with_italic(&self) -> Self {
        Self {
            italic: true,
            ..self.clone()
        }
    }

    pub fn with_underline(&self) -> Self {
        Self {
            underline: true,
            ..self.clone()
        }
    }

    pub fn with_subscript(&self) -> Self {
        Self {
            subscript: true,
            ..self.clone()
        }
    }

    pub fn with_superscript(&self) -> Self {
        Self {
            superscript: true,
            ..self.clone()
        }
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = Some(color.to_string());
    }

    pub fn set_highlight(&mut self, highlight: &str) {
        self.highlight = Some(highlight.to_string());
    }

    pub fn set_font_family(&mut self, font_family: &str) {
        self.font_family = Some(font_family.to_string());
    }

    /// Font size in whole points; doubled into half-point units at render time.
    pub fn set_font_size(&mut self, points: u32) {
        self.font_size = Some(points);
    }

    /// Color and highlight are cleared together.
    pub fn clear_color(&mut self) {
        self.color = None;
        self.highlight = None;
    }

    /// Run properties block (`w:rPr`), or an empty string when nothing is set.
    ///
    /// Property order is fixed: bold, italic, underline, vertical alignment,
    /// color, highlight, fonts, size. When both subscript and superscript are
    /// set, subscript wins; only one `w:vertAlign` is ever emitted.
    pub fn run_properties(&self) -> String {
        let mut styles = String::new();
        if self.bold {
            styles.push_str("<w:b />");
        }
        if self.italic {
            styles.push_str("<w:i />");
        }
        if self.underline {
            styles.push_str("<w:u w:val=\"single\"/>");
        }
        if self.subscript {
            styles.push_str("<w:vertAlign w:val=\"subscript\" />");
        } else if self.superscript {
            styles.push_str("<w:vertAlign w:val=\"superscript\" />");
        }
        if let Some(color) = &self.color {
            styles.push_str(&format!("<w:color w:val=\"{color}\" />"));
        }
        if let Some(highlight) = &self.highlight {
            styles.push_str(&format!("<w:highlight w:val=\"{highlight}\" />"));
        }
        if let Some(family) = &self.font_family {
            styles.push_str(&format!(
                "<w:rFonts w:ascii=\"{family}\" w:hAnsi=\"{family}\" w:cs=\"{family}\"/>"
            ));
        }
        if let Some(points) = self.font_size {
            let half_points = points * 2;
            styles.push_str(&format!(
                "<w:sz w:val=\"{half_points}\"/><w:szCs w:val=\"{half_points}\"/>"
            ));
        }
        if styles.is_empty() {
            String::new()
        } else {
            format!("<w:rPr>{styles}</w:rPr>")
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.bold {
            parts.push("bold".to_string());
        }
        if self.italic {
            parts.push("italic".to_string());
        }
        if self.underline {
            parts.push("underline".to_string());
        }
        if self.subscript {
            parts.push("subscript".to_string());
        }
        if self.superscript {
            parts.push("superscript".to_string());
        }
        if let Some(color) = &self.color {
            parts.push(format!("color {color}"));
        }
        if let Some(highlight) = &self.highlight {
            parts.push(format!("highlight {highlight}"));
        }
        if let Some(family) = &self.font_family {
            parts.push(format!("font_family {family}"));
        }
        if let Some(points) = self.font_size {
            parts.push(format!("font_size {points}"));
        }
        write!(f, "{}", parts.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_leave_the_receiver_unchanged() {
        let base = TextFormat::default();
        let bold = base.with_bold();
        assert_eq!(base, TextFormat::default());
        assert_ne!(bold, base);
        assert_eq!(bold.run_properties(), "<w:rPr><w:b /></w:rPr>");
    }

    #[test]
    fn toggles_compose() {
        let fmt = TextFormat::default().with_bold().with_italic().with_underline();
        assert_eq!(
            fmt.run_properties(),
            "<w:rPr><w:b /><w:i /><w:u w:val=\"single\"/></w:rPr>"
        );
    }

    #[test]
    fn setters_only_touch_the_clone() {
        let base = TextFormat::default();
        let mut working = base.clone();
        working.set_color("ff0000");
        working.set_font_family("Arial");
        assert_eq!(base, TextFormat::default());
        assert!(working.run_properties().contains("<w:color w:val=\"ff0000\" />"));
    }

    #[test]
    fn clear_color_drops_color_and_highlight_together() {
        let mut fmt = TextFormat::default();
        fmt.set_color("00ff00");
        fmt.set_highlight("green");
        fmt.clear_color();
        assert_eq!(fmt, TextFormat::default());
    }

    #[test]
    fn subscript_wins_over_superscript() {
        let fmt = TextFormat::default().with_superscript().with_subscript();
        let props = fmt.run_properties();
        assert!(props.contains("w:val=\"subscript\""));
        assert!(!props.contains("w:val=\"superscript\""));
    }

    #[test]
    fn font_size_is_doubled_into_half_points() {
        let mut fmt = TextFormat::default();
        fmt.set_font_size(12);
        assert_eq!(
            fmt.run_properties(),
            "<w:rPr><w:sz w:val=\"24\"/><w:szCs w:val=\"24\"/></w:rPr>"
        );
    }

    #[test]
    fn empty_format_renders_no_wrapper() {
        assert_eq!(TextFormat::default().run_properties(), "");
    }

    #[test]
    fn description_lists_set_properties() {
        let mut fmt = TextFormat::default().with_bold();
        fmt.set_highlight("yellow");
        assert_eq!(fmt.to_string(), "bold|highlight yellow");
    }
}
