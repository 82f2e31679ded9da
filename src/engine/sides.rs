use log::debug;

use crate::domain::{Match, Round};

use super::state::Sides;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    First,
    Second,
}

impl Half {
    pub fn of(round_number: u32, halftime_round: u32) -> Self {
        if round_number < halftime_round {
            Half::First
        } else {
            Half::Second
        }
    }
}

/// Best-effort attacker/defender assignment for a round.
///
/// The team of the bomb planter attacks in the first half and defends in the
/// second (sides swap at halftime). Rounds without a plant borrow the first
/// plant found in the same half. If the whole half has no plant, the first
/// team label in roster order is assumed to attack, which can be wrong.
pub fn resolve_sides(game: &Match, round: &Round, halftime_round: u32) -> Sides {
    let labels = game.team_labels();
    let half = Half::of(round.number, halftime_round);

    let planter_team = planter_team(game, round).or_else(|| {
        game.rounds
            .iter()
            .filter(|r| Half::of(r.number, halftime_round) == half)
            .find_map(|r| planter_team(game, r))
    });

    let Some(planter_team) = planter_team else {
        debug!(
            "Match {} round {}: no plant in this half, defaulting sides",
            game.id(),
            round.number
        );
        return Sides::new(labels.first().copied(), labels.get(1).copied());
    };

    let other_team = labels.iter().copied().find(|&l| l != planter_team);

    match half {
        Half::First => Sides::new(Some(planter_team), other_team),
        Half::Second => Sides::new(other_team, Some(planter_team)),
    }
}

fn planter_team<'a>(game: &'a Match, round: &Round) -> Option<&'a str> {
    round
        .bomb_planter
        .as_deref()
        .and_then(|planter| game.team_of(planter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{MatchBuilder, round};
    use crate::domain::RoundResultCode;

    fn match_with_plants(plants: &[(u32, &str)], rounds: u32) -> Match {
        let mut builder = MatchBuilder::new("m")
            .team("Blue", &["b1", "b2"])
            .team("Red", &["r1", "r2"]);
        for number in 0..rounds {
            let mut r = round(RoundResultCode::Elimination, None);
            if let Some((_, planter)) = plants.iter().find(|(n, _)| *n == number) {
                r.bomb_planter = Some(planter.to_string());
                r.plant_time_ms = Some(30_000);
            }
            builder = builder.round(r);
        }
        builder.build()
    }

    #[test]
    fn test_planter_attacks_in_first_half() {
        let game = match_with_plants(&[(0, "r1")], 2);
        let sides = resolve_sides(&game, &game.rounds[0], 12);
        assert_eq!(sides, Sides::new(Some("Red"), Some("Blue")));
    }

    #[test]
    fn test_planter_defends_label_in_second_half() {
        let game = match_with_plants(&[(12, "r2")], 14);
        let sides = resolve_sides(&game, &game.rounds[12], 12);
        assert_eq!(sides, Sides::new(Some("Blue"), Some("Red")));
    }

    #[test]
    fn test_borrows_plant_from_same_half() {
        let game = match_with_plants(&[(3, "b1"), (13, "b2")], 15);

        let first = resolve_sides(&game, &game.rounds[0], 12);
        assert_eq!(first, Sides::new(Some("Blue"), Some("Red")));

        let second = resolve_sides(&game, &game.rounds[14], 12);
        assert_eq!(second, Sides::new(Some("Red"), Some("Blue")));
    }

    #[test]
    fn test_does_not_borrow_across_halves() {
        let game = match_with_plants(&[(13, "r1")], 14);
        // Nothing planted in the first half: roster order decides
        let sides = resolve_sides(&game, &game.rounds[2], 12);
        assert_eq!(sides, Sides::new(Some("Blue"), Some("Red")));
    }

    #[test]
    fn test_unknown_planter_is_ignored() {
        let game = match_with_plants(&[(0, "ghost"), (1, "r1")], 2);
        let sides = resolve_sides(&game, &game.rounds[0], 12);
        assert_eq!(sides, Sides::new(Some("Red"), Some("Blue")));
    }
}
