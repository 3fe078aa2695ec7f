//! Escaping markup builder.
//!
//! Text and attribute values only enter a [`Markup`] through
//! [`MarkupBuilder::text`] and the attribute slices, both of which escape, so
//! server- or user-supplied strings cannot inject tags.

/// Finished HTML fragment produced by [`MarkupBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Default)]
pub struct MarkupBuilder {
    buf: String,
}

impl MarkupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doctype(&mut self) -> &mut Self {
        self.buf.push_str("<!DOCTYPE html>");
        self
    }

    pub fn open(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self
    }

    /// Element without a closing tag (`input`, `meta`).
    pub fn void(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self
    }

    pub fn close(&mut self, tag: &'static str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape(text));
        self
    }

    /// `<tag attrs>text</tag>` in one call.
    pub fn element(
        &mut self,
        tag: &'static str,
        attrs: &[(&'static str, &str)],
        text: &str,
    ) -> &mut Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    /// Embeds a fragment that was itself built by a `MarkupBuilder`.
    pub fn fragment(&mut self, markup: &Markup) -> &mut Self {
        self.buf.push_str(markup.as_str());
        self
    }

    pub fn finish(self) -> Markup {
        Markup(self.buf)
    }

    fn start_tag(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape(value));
            self.buf.push('"');
        }
        self.buf.push('>');
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut builder = MarkupBuilder::new();
        builder.element(
            "p",
            &[("title", "\"quoted\" & <b>")],
            "<script>alert('x')</script>",
        );

        assert_eq!(
            builder.finish().as_str(),
            "<p title=\"&quot;quoted&quot; &amp; &lt;b&gt;\">\
             &lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn fragments_are_embedded_verbatim() {
        let mut inner = MarkupBuilder::new();
        inner.element("li", &[], "a & b");
        let inner = inner.finish();

        let mut outer = MarkupBuilder::new();
        outer.open("ul", &[]).fragment(&inner).close("ul");

        assert_eq!(outer.finish().as_str(), "<ul><li>a &amp; b</li></ul>");
    }
}
