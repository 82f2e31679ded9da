use log::{info, warn};
use ndarray::Array1;

use crate::components::{Component, ComponentMap, ComponentWeights};

use super::calculator::RatingCalculator;
use super::types::{FinalRatingParams, NormalizationParams, ZScoreParams};

/// Estimates z-score parameters from a population of player-matches.
/// Components are fitted first, then the final rating transform is fitted
/// on the pre-normalized ratings those parameters produce.
pub fn fit_normalization(components: &ComponentMap, weights: &ComponentWeights) -> NormalizationParams {
    let mut params = NormalizationParams::default();

    for component in Component::ALL {
        let column: Array1<f64> = components
            .values()
            .filter_map(|values| values.get(component))
            .collect();

        match column_params(&column) {
            Some(fitted) => {
                info!(
                    "  → {}: mean {:.4}, std {:.4} over {} samples",
                    component,
                    fitted.mean,
                    fitted.std,
                    column.len()
                );
                params.set(component, fitted);
            }
            None => warn!("No samples for {}, leaving it unfitted", component),
        }
    }

    let calculator = RatingCalculator::with_params(weights, &params);
    let pre_ratings: Array1<f64> = components
        .values()
        .map(|values| {
            let (_, weighted_sum) = calculator.weigh(&calculator.normalize(values));
            calculator.pre_normalized(weighted_sum)
        })
        .collect();

    if let Some(fitted) = column_params(&pre_ratings) {
        params.final_rating = FinalRatingParams {
            mean: fitted.mean,
            std: fitted.spread(),
            ..FinalRatingParams::default()
        };
    }

    params
}

/// Mean and population standard deviation
fn column_params(column: &Array1<f64>) -> Option<ZScoreParams> {
    let mean = column.mean()?;
    Some(ZScoreParams {
        mean,
        std: column.std(0.0),
    })
}
