use crate::{render_verdict, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlInputChanged(input) => {
            state.set_url_input(input);
            Vec::new()
        }
        Msg::Submitted => {
            // No syntax check here; the backend echoes its own validation errors.
            let (submission_id, request) = state.begin_submission();
            vec![Effect::SubmitAnalysis {
                submission_id,
                request,
            }]
        }
        Msg::AnalysisFinished {
            submission_id,
            request,
            outcome,
        } => {
            // Overlapping submissions are not reconciled: the last one applied wins.
            let verdict = render_verdict(&request, &outcome);
            state.apply_verdict(submission_id, verdict);
            vec![Effect::ScrollResultIntoView]
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
