use unicode_width::UnicodeWidthStr;

pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub header_padding: f64,
    pub min_node_width: f64,
    pub min_node_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            padding_x: 12.0,
            padding_y: 8.0,
            header_padding: 4.0,
            min_node_width: 100.0,
            min_node_height: 40.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    pub fn header_height(&self) -> f64 {
        self.line_height + self.header_padding * 2.0
    }

    pub fn node_size<S: AsRef<str>>(&self, header: &str, lines: &[S]) -> (f64, f64) {
        let header_width = self.text_width(header);

        let max_line_width = lines
            .iter()
            .map(|l| self.text_width(l.as_ref()))
            .fold(0.0, f64::max);

        let content_width = header_width.max(max_line_width) + self.padding_x * 2.0;
        let width = content_width.max(self.min_node_width);

        let body_height = if lines.is_empty() {
            0.0
        } else {
            lines.len() as f64 * self.line_height + self.padding_y * 2.0
        };

        let height = (self.header_height() + body_height).max(self.min_node_height);

        (width, height)
    }

    /// Size of a multi-line node label: first line is the header.
    pub fn label_size(&self, label: &str) -> (f64, f64) {
        let mut lines = label.lines();
        let header = lines.next().unwrap_or_default();
        let body: Vec<&str> = lines.collect();
        self.node_size(header, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("Ayu"), 3.0 * 8.0);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // Wide characters count double.
        assert_eq!(m.text_width("学生"), 4.0 * 8.0);
    }

    #[test]
    fn test_node_size_no_lines() {
        let m = TextMetrics::default();
        let (w, h) = m.node_size::<&str>("Ayu", &[]);
        assert_eq!(w, m.min_node_width);
        assert_eq!(h, m.min_node_height);
    }

    #[test]
    fn test_label_size_grows_with_lines() {
        let m = TextMetrics::default();
        let (_, short) = m.label_size("Ayu\nid: Number (PK)");
        let (w, tall) = m.label_size("Ayu\nid: Number (PK)\nNama: String\nFakultas: String");
        assert!(tall > short);
        assert!(w >= m.text_width("Fakultas: String"));
    }

    #[test]
    fn test_label_size_empty() {
        let m = TextMetrics::default();
        let (w, h) = m.label_size("");
        assert!(w > 0.0 && h > 0.0);
    }
}
