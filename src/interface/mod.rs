pub mod prompts;
pub mod render;

pub use prompts::{
    collect_plan_request, parse_or, parse_positive, prompt_activity, prompt_biometrics,
    prompt_known_tdee, prompt_preferences, prompt_yes_no, report_unmatched_excludes,
};
pub use render::{display_meal_detail, display_meal_list, display_report, format_report};
