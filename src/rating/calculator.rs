use chrono::{DateTime, Utc};
use ndarray::Array1;

use crate::components::{Component, ComponentValues, ComponentWeights};
use crate::config::settings::RatingSettings;

use super::types::{NormalizationParams, PlayerInfo, PlayerRating, ZScoreParams};

/// Turns raw component values into a single normalized rating
pub struct RatingCalculator<'a> {
    weights: &'a ComponentWeights,
    params: &'a NormalizationParams,
}

impl<'a> RatingCalculator<'a> {
    pub fn new(settings: &'a RatingSettings) -> Self {
        Self::with_params(&settings.weights, &settings.normalization)
    }

    pub fn with_params(weights: &'a ComponentWeights, params: &'a NormalizationParams) -> Self {
        Self { weights, params }
    }

    /// Z-scores every component that has fitted parameters. Kill and death
    /// contributions are scored together as one net impact, split evenly, and
    /// only when both are present and kill parameters are known. Components
    /// without parameters are left out of the rating.
    pub fn normalize(&self, values: &ComponentValues) -> ComponentValues {
        let mut normalized = ComponentValues::new();

        let kill = values.get(Component::KillContrib);
        let death = values.get(Component::DeathContrib);
        if let (Some(kill), Some(death), Some(kill_params)) =
            (kill, death, self.params.get(Component::KillContrib))
        {
            let death_mean = self
                .params
                .get(Component::DeathContrib)
                .map(|p| p.mean)
                .unwrap_or(0.0);
            let net = kill + death;
            let net_norm = (net - (kill_params.mean + death_mean)) / kill_params.spread();
            normalized.insert(Component::KillContrib, net_norm / 2.0);
            normalized.insert(Component::DeathContrib, net_norm / 2.0);
        }

        for (component, value) in values.iter() {
            if matches!(component, Component::KillContrib | Component::DeathContrib) {
                continue;
            }
            if let Some(params) = self.params.get(component) {
                normalized.insert(component, params.z_score(value));
            }
        }

        normalized
    }

    /// Per-component weighted values and their sum
    pub fn weigh(&self, normalized: &ComponentValues) -> (ComponentValues, f64) {
        let components: Vec<Component> = normalized.iter().map(|(c, _)| c).collect();
        let values: Array1<f64> = normalized.iter().map(|(_, v)| v).collect();
        let weights: Array1<f64> = components
            .iter()
            .map(|&c| self.weights.get(c).unwrap_or(0.0))
            .collect();

        let products = &values * &weights;
        let mut weighted = ComponentValues::new();
        for (component, product) in components.iter().zip(products.iter()) {
            weighted.insert(*component, *product);
        }

        (weighted, values.dot(&weights))
    }

    pub fn pre_normalized(&self, weighted_sum: f64) -> f64 {
        let final_params = &self.params.final_rating;
        final_params.base_rating + final_params.scaling_factor * weighted_sum
    }

    pub fn final_rating(&self, pre_normalized: f64) -> f64 {
        let final_params = &self.params.final_rating;
        let params = ZScoreParams {
            mean: final_params.mean,
            std: final_params.std,
        };
        params.z_score(pre_normalized)
    }

    pub fn rate(
        &self,
        match_id: &str,
        player: PlayerInfo,
        components: ComponentValues,
        calculated_at: DateTime<Utc>,
    ) -> PlayerRating {
        let normalized = self.normalize(&components);
        let (weighted, weighted_sum) = self.weigh(&normalized);
        let pre_normalized_rating = self.pre_normalized(weighted_sum);

        PlayerRating {
            match_id: match_id.to_string(),
            player,
            rating: self.final_rating(pre_normalized_rating),
            components,
            normalized_components: normalized,
            weighted_components: weighted,
            weighted_sum,
            pre_normalized_rating,
            scaling_factor: self.params.final_rating.scaling_factor,
            base_rating: self.params.final_rating.base_rating,
            calculated_at,
        }
    }
}
