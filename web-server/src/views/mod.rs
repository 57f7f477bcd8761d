//! HTML views
//!
//! Pages are assembled as strings; every dynamic value goes through
//! [`escape`].

pub mod page;

pub use page::{render_page, Outcome};

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b a="1">x & 'y'</b>"#), "&lt;b a=&quot;1&quot;&gt;x &amp; &#x27;y&#x27;&lt;/b&gt;");
        assert_eq!(escape("Fasting Blood Sugar > 120 mg/dl"), "Fasting Blood Sugar &gt; 120 mg/dl");
        assert_eq!(escape("plain"), "plain");
    }
}
