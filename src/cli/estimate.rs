use die::die;
use nu_ansi_term::Color;

use super::ColorMode;
use crate::config::Config;
use crate::factory::{
    self,
    wiring::{populated_registry, ESTIMATE_CATEGORY},
};
use crate::EstimateArgs;

pub(crate) fn estimate_cmd(color: ColorMode, config: &Config, args: &EstimateArgs) {
    let model = match config.catalog.find(&args.model) {
        Some(model) => model,
        None => die!("model \"{}\" is not in the catalog", args.model),
    };

    let registry = populated_registry();

    let estimator = match factory::build(
        &registry,
        model,
        ESTIMATE_CATEGORY,
        config.build.into(),
    ) {
        Ok(estimator) => estimator,
        Err(err) => die!("failed to build an estimator: {}", err),
    };

    let cost = estimator.estimate(args.prompt_tokens, args.completion_tokens);
    let cost = format!("${:.6}", cost);

    match color {
        ColorMode::On => {
            let name = Color::Default.bold();
            let amount = Color::Green.bold();

            println!(
                "{} ({}): {}",
                name.paint(estimator.model_name()),
                estimator.provider(),
                amount.paint(cost)
            );
        }
        ColorMode::Off => {
            println!(
                "{} ({}): {}",
                estimator.model_name(),
                estimator.provider(),
                cost
            );
        }
    }
}
