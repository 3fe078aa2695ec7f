use phishcheck_core::{AppViewModel, Effect, ResultPanel, Variant, VisualState};

use super::constants::*;
use super::dom::DomCommand;
use super::markup::{Markup, MarkupBuilder};

pub const ANALYZING_TEXT: &str = "Analyzing URL...";

pub fn render(view: &AppViewModel) -> Vec<DomCommand> {
    let mut cmds = vec![DomCommand::SetInputValue {
        element_id: INPUT_URL,
        value: view.url_input.clone(),
    }];

    match &view.panel {
        ResultPanel::Hidden => {
            cmds.push(DomCommand::SetVisible {
                element_id: PANEL_RESULT,
                visible: false,
            });
        }
        ResultPanel::Analyzing { .. } => {
            cmds.push(DomCommand::SetVisible {
                element_id: PANEL_RESULT,
                visible: true,
            });
            cmds.push(DomCommand::SetBackgroundColor {
                element_id: PANEL_RESULT,
                color: None,
            });
            cmds.push(DomCommand::SetInnerHtml {
                element_id: PANEL_RESULT,
                html: analyzing_markup(),
            });
        }
        ResultPanel::Verdict(state) => {
            cmds.push(DomCommand::SetVisible {
                element_id: PANEL_RESULT,
                visible: true,
            });
            cmds.push(DomCommand::SetBackgroundColor {
                element_id: PANEL_RESULT,
                color: Some(state.palette.background),
            });
            cmds.push(DomCommand::SetInnerHtml {
                element_id: PANEL_RESULT,
                html: verdict_markup(state),
            });
        }
    }

    cmds
}

/// DOM side of the effects; network effects are handled by the effect runner.
pub fn render_effects(effects: &[Effect]) -> Vec<DomCommand> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ScrollResultIntoView => Some(DomCommand::ScrollIntoView {
                element_id: PANEL_RESULT,
            }),
            Effect::SubmitAnalysis { .. } => None,
        })
        .collect()
}

fn analyzing_markup() -> Markup {
    let mut html = MarkupBuilder::new();
    html.element(
        "p",
        &[(
            "style",
            "color: #fff; background: #333; padding: 10px; border-radius: 5px;",
        )],
        ANALYZING_TEXT,
    );
    html.finish()
}

/// Heading, echoed URL, body, score and risk factors, in that order.
pub fn verdict_markup(state: &VisualState) -> Markup {
    let color = state.palette.text;
    let plain = format!("color: {color};");
    let mut html = MarkupBuilder::new();

    if state.variant == Variant::Error {
        html.element("h3", &[("style", plain.as_str())], state.heading);
        if let Some(message) = &state.body_message {
            html.element("p", &[("style", plain.as_str())], message);
        }
        let url_style = format!("color: {color}; word-break: break-all; margin-top: 10px;");
        write_url(&mut html, state, &url_style);
        return html.finish();
    }

    let heading_style = format!("color: {color}; margin-bottom: 15px;");
    let url_style = format!(
        "color: {color}; word-break: break-all; background: {}; padding: 10px; \
         border-radius: 5px; margin-bottom: 15px;",
        state.palette.url_backdrop.unwrap_or("transparent")
    );
    let message_style = format!("color: {color}; font-size: 18px; margin-bottom: 10px;");
    let score_style = format!("color: {color}; font-weight: bold; font-size: 20px;");

    html.element("h3", &[("style", heading_style.as_str())], state.heading);
    write_url(&mut html, state, &url_style);
    if let Some(message) = &state.body_message {
        html.element("p", &[("style", message_style.as_str())], message);
    }
    if let Some(score) = &state.score_line {
        html.element(
            "p",
            &[("style", score_style.as_str())],
            &format!("Risk Score: {score}"),
        );
    }
    if let Some(block) = &state.risk_factors {
        let title_style = format!("color: {color}; font-weight: bold; margin-bottom: 10px;");
        let list_style =
            format!("color: {color}; text-align: left; display: inline-block; margin: 0;");
        html.open("div", &[("style", "margin-top: 15px;")])
            .element("p", &[("style", title_style.as_str())], block.title)
            .open("ul", &[("style", list_style.as_str())]);
        for item in &block.items {
            html.element("li", &[("style", "text-align: left; margin: 5px 0;")], item);
        }
        html.close("ul").close("div");
    }

    html.finish()
}

fn write_url(html: &mut MarkupBuilder, state: &VisualState, style: &str) {
    html.open("p", &[("style", style)])
        .element("strong", &[], state.url_label)
        .text(" ")
        .text(&state.url_echoed)
        .close("p");
}
