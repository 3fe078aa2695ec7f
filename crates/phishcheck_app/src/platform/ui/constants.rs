pub type ElementId = &'static str;

pub const FORM_ANALYZE: ElementId = "phishingForm";
pub const INPUT_URL: ElementId = "name";
pub const PANEL_RESULT: ElementId = "result";
