pub mod evaluation;
pub mod knobs;
pub mod output;
pub mod search;

pub use evaluation::{
    evaluate_knobs, evaluate_scenario, EvaluationResult, ScenarioGrid, HillClimbConfig,
    ScenarioResult,
};
pub use knobs::{KnobRanges, TunerKnobs};
pub use output::{print_pareto_frontier, print_topk, write_best_json, write_csv};
pub use search::{run_tuner, TunerConfig, TunerResults};
