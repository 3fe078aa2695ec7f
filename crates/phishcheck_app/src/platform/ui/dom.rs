//! In-memory stand-in for the page the result panel lives on.
//!
//! Render output is a list of [`DomCommand`]s; [`Document::apply`] is the
//! only place they take effect, which keeps painting separate from the
//! verdict logic and lets the page be exported as static HTML.

use std::collections::BTreeMap;

use super::constants::{ElementId, FORM_ANALYZE, INPUT_URL, PANEL_RESULT};
use super::markup::{Markup, MarkupBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomCommand {
    SetVisible {
        element_id: ElementId,
        visible: bool,
    },
    SetBackgroundColor {
        element_id: ElementId,
        color: Option<&'static str>,
    },
    SetInnerHtml {
        element_id: ElementId,
        html: Markup,
    },
    SetInputValue {
        element_id: ElementId,
        value: String,
    },
    ScrollIntoView {
        element_id: ElementId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementState {
    pub visible: bool,
    pub background: Option<&'static str>,
    pub inner_html: Markup,
    pub value: String,
    pub scroll_requests: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    elements: BTreeMap<ElementId, ElementState>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(
            FORM_ANALYZE,
            ElementState {
                visible: true,
                ..ElementState::default()
            },
        );
        elements.insert(
            INPUT_URL,
            ElementState {
                visible: true,
                ..ElementState::default()
            },
        );
        elements.insert(PANEL_RESULT, ElementState::default());
        Self {
            title: title.into(),
            elements,
        }
    }

    pub fn element(&self, element_id: ElementId) -> Option<&ElementState> {
        self.elements.get(element_id)
    }

    /// Applies one command. Commands for unknown elements are ignored and
    /// reported as `false`, like a `getElementById` miss.
    pub fn apply(&mut self, command: DomCommand) -> bool {
        let element_id = match &command {
            DomCommand::SetVisible { element_id, .. }
            | DomCommand::SetBackgroundColor { element_id, .. }
            | DomCommand::SetInnerHtml { element_id, .. }
            | DomCommand::SetInputValue { element_id, .. }
            | DomCommand::ScrollIntoView { element_id } => *element_id,
        };
        let Some(element) = self.elements.get_mut(element_id) else {
            return false;
        };

        match command {
            DomCommand::SetVisible { visible, .. } => element.visible = visible,
            DomCommand::SetBackgroundColor { color, .. } => element.background = color,
            // Replaces, never appends: each submission fully overwrites the panel.
            DomCommand::SetInnerHtml { html, .. } => element.inner_html = html,
            DomCommand::SetInputValue { value, .. } => element.value = value,
            DomCommand::ScrollIntoView { .. } => element.scroll_requests += 1,
        }
        true
    }

    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = DomCommand>) -> usize {
        commands
            .into_iter()
            .filter(|command| !self.apply(command.clone()))
            .count()
    }

    /// Serializes the current document as a standalone page whose form posts
    /// to `action`.
    pub fn to_html_page(&self, action: &str) -> String {
        let input_value = self
            .element(INPUT_URL)
            .map(|input| input.value.as_str())
            .unwrap_or_default();
        let result = self.element(PANEL_RESULT).cloned().unwrap_or_default();
        let result_style = format!(
            "display: {}; background-color: {}; padding: 20px; border-radius: 10px; \
             text-align: center; margin-top: 20px;",
            if result.visible { "block" } else { "none" },
            result.background.unwrap_or("transparent"),
        );

        let mut page = MarkupBuilder::new();
        page.doctype()
            .open("html", &[("lang", "en")])
            .open("head", &[])
            .void("meta", &[("charset", "utf-8")])
            .element("title", &[], &self.title)
            .close("head")
            .open(
                "body",
                &[("style", "font-family: sans-serif; max-width: 720px; margin: 40px auto;")],
            )
            .element("h1", &[], &self.title)
            .open(
                "form",
                &[("id", FORM_ANALYZE), ("method", "post"), ("action", action)],
            )
            .void(
                "input",
                &[
                    ("type", "text"),
                    ("id", INPUT_URL),
                    ("name", INPUT_URL),
                    ("value", input_value),
                    ("placeholder", "https://example.com"),
                ],
            )
            .element("button", &[("type", "submit")], "Check URL")
            .close("form")
            .open("div", &[("id", PANEL_RESULT), ("style", result_style.as_str())])
            .fragment(&result.inner_html)
            .close("div")
            .close("body")
            .close("html");
        let mut html = page.finish().as_str().to_string();
        html.push('\n');
        html
    }
}
