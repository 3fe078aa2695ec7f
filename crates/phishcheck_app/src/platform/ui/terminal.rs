use phishcheck_core::VisualState;

/// Plain-text rendition of a verdict for the terminal.
pub fn summarize(state: &VisualState) -> String {
    let mut lines = vec![
        state.heading.to_string(),
        format!("{} {}", state.url_label, state.url_echoed),
    ];
    if let Some(message) = &state.body_message {
        lines.push(message.clone());
    }
    if let Some(score) = &state.score_line {
        lines.push(format!("Risk Score: {score}"));
    }
    if let Some(block) = &state.risk_factors {
        lines.push(block.title.to_string());
        lines.extend(block.items.iter().map(|item| format!("  - {item}")));
    }
    lines.join("\n")
}
