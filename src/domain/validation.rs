use crate::errors::RatingError;

use super::models::Match;

/// Check the structural invariants the engine relies on.
/// The engine itself assumes validated input.
pub fn validate_match(game: &Match) -> Result<(), RatingError> {
    validate_match_id(game)?;
    validate_players(game)?;
    validate_round_numbers(game)
}

fn validate_match_id(game: &Match) -> Result<(), RatingError> {
    if game.id().trim().is_empty() {
        return Err(RatingError::invalid_match("<unknown>", "matchInfo missing matchId"));
    }
    Ok(())
}

fn validate_players(game: &Match) -> Result<(), RatingError> {
    for (idx, player) in game.players.iter().enumerate() {
        if player.puuid.trim().is_empty() {
            return Err(RatingError::invalid_match(
                game.id(),
                format!("player {} has an empty puuid", idx),
            ));
        }
        if player.team_id.trim().is_empty() {
            return Err(RatingError::invalid_match(
                game.id(),
                format!("player {} has an empty teamId", player.puuid),
            ));
        }
    }
    Ok(())
}

fn validate_round_numbers(game: &Match) -> Result<(), RatingError> {
    for (expected, round) in game.rounds.iter().enumerate() {
        if round.number as usize != expected {
            return Err(RatingError::invalid_match(
                game.id(),
                format!(
                    "round numbers must be contiguous from 0, found {} at position {}",
                    round.number, expected
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Match {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_match_passes() {
        let game = parse(
            r#"{ "matchInfo": { "matchId": "m" },
                 "players": [ { "puuid": "a", "teamId": "Red" } ],
                 "roundResults": [ { "roundNum": 0 }, { "roundNum": 1 } ] }"#,
        );
        assert!(validate_match(&game).is_ok());
    }

    #[test]
    fn test_empty_match_id_fails() {
        let game = parse(r#"{ "matchInfo": { "matchId": " " } }"#);
        assert!(matches!(
            validate_match(&game),
            Err(RatingError::InvalidMatch { .. })
        ));
    }

    #[test]
    fn test_gap_in_round_numbers_fails() {
        let game = parse(
            r#"{ "matchInfo": { "matchId": "m" },
                 "roundResults": [ { "roundNum": 0 }, { "roundNum": 2 } ] }"#,
        );
        let err = validate_match(&game).unwrap_err();
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn test_missing_team_fails() {
        let game = parse(
            r#"{ "matchInfo": { "matchId": "m" },
                 "players": [ { "puuid": "a", "teamId": "" } ] }"#,
        );
        assert!(validate_match(&game).is_err());
    }
}
