//! Input validation for all backend routes
//!
//! The store trusts what it is given, so every name, country, rank and id
//! coming off the wire is checked here first.

use scoreboard_store::{CountryCode, PlayerId, PlayerName, PlayerUpdate};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Player name cannot be empty")]
    NameEmpty,

    #[error("Player name too long (max 15 bytes, got {0} bytes)")]
    NameTooLong(usize),

    #[error("Player name must be a string")]
    NameNotString,

    #[error("Country cannot be empty")]
    CountryEmpty,

    #[error("Country code should be 2 letters (got {0:?})")]
    CountryInvalid(String),

    #[error("Country cannot be modified")]
    CountryImmutable,

    #[error("Score must be an integer")]
    ScoreNotInteger,

    #[error("Rank should be an integer")]
    RankNotInteger,

    #[error("Rank cannot be 0 or negative")]
    RankNotPositive,

    #[error("Player id should be an integer")]
    IdNotInteger,

    #[error("Player id cannot be 0 or negative")]
    IdNotPositive,

    #[error("Update must be a JSON object")]
    UpdateNotObject,

    #[error("Invalid request body: {0}")]
    Body(String),
}

/// Validates a player name
///
/// Rules:
/// - Cannot be empty
/// - Max 15 bytes
pub fn validate_player_name(name: &str) -> Result<PlayerName, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameEmpty);
    }

    PlayerName::from(name).map_err(|_| ValidationError::NameTooLong(name.len()))
}

/// Validates a country code and normalises it to upper case
///
/// Rules:
/// - Cannot be empty
/// - Exactly 2 ASCII letters
pub fn validate_country(country: &str) -> Result<CountryCode, ValidationError> {
    if country.is_empty() {
        return Err(ValidationError::CountryEmpty);
    }

    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::CountryInvalid(country.to_string()));
    }

    CountryCode::from(&country.to_ascii_uppercase())
        .map_err(|_| ValidationError::CountryInvalid(country.to_string()))
}

/// Parses a 1-based rank from a path segment
pub fn parse_rank(raw: &str) -> Result<usize, ValidationError> {
    let rank: i64 = raw.parse().map_err(|_| ValidationError::RankNotInteger)?;

    if rank < 1 {
        return Err(ValidationError::RankNotPositive);
    }

    usize::try_from(rank).map_err(|_| ValidationError::RankNotInteger)
}

/// Parses a player id from a path segment
pub fn parse_player_id(raw: &str) -> Result<PlayerId, ValidationError> {
    let id: i64 = raw.parse().map_err(|_| ValidationError::IdNotInteger)?;

    if id < 1 {
        return Err(ValidationError::IdNotPositive);
    }

    PlayerId::try_from(id).map_err(|_| ValidationError::IdNotInteger)
}

/// Validates a partial update body
///
/// Rules:
/// - Must be a JSON object
/// - `country` may not be present at all
/// - `score`, when present, must be an integer
/// - `name`, when present, must be a valid player name
/// - Unknown keys are ignored
pub fn parse_update(body: &Value) -> Result<PlayerUpdate, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::UpdateNotObject)?;

    if fields.contains_key("country") {
        return Err(ValidationError::CountryImmutable);
    }

    let mut update = PlayerUpdate::default();

    if let Some(score) = fields.get("score") {
        let score = score.as_i64().ok_or(ValidationError::ScoreNotInteger)?;
        update = update.score(score);
    }

    if let Some(name) = fields.get("name") {
        let name = name.as_str().ok_or(ValidationError::NameNotString)?;
        update = update.name(validate_player_name(name)?);
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Player name validation tests
    #[test]
    fn test_valid_player_names() {
        assert!(validate_player_name("Steve").is_ok());
        assert!(validate_player_name("a").is_ok());
        assert!(validate_player_name("Player 123").is_ok());
        assert!(validate_player_name("123456789012345").is_ok()); // exactly 15 chars
    }

    #[test]
    fn test_empty_player_name() {
        assert_eq!(validate_player_name(""), Err(ValidationError::NameEmpty));
    }

    #[test]
    fn test_player_name_too_long() {
        let long_name = "1234567890123456"; // 16 characters
        assert_eq!(
            validate_player_name(long_name),
            Err(ValidationError::NameTooLong(16))
        );
    }

    #[test]
    fn test_player_name_limit_counts_bytes() {
        // 10 characters, 20 bytes
        let name = "éééééééééé";
        let err = validate_player_name(name).unwrap_err();
        assert_eq!(err, ValidationError::NameTooLong(20));
        assert_eq!(
            err.to_string(),
            "Player name too long (max 15 bytes, got 20 bytes)"
        );
    }

    // Country validation tests
    #[test]
    fn test_valid_countries() {
        assert_eq!(validate_country("IN").unwrap().as_str(), "IN");
        assert_eq!(validate_country("us").unwrap().as_str(), "US");
    }

    #[test]
    fn test_invalid_countries() {
        assert_eq!(validate_country(""), Err(ValidationError::CountryEmpty));
        assert_eq!(
            validate_country("IND"),
            Err(ValidationError::CountryInvalid("IND".to_string()))
        );
        assert_eq!(
            validate_country("I"),
            Err(ValidationError::CountryInvalid("I".to_string()))
        );
        assert_eq!(
            validate_country("1N"),
            Err(ValidationError::CountryInvalid("1N".to_string()))
        );
    }

    // Path parameter tests
    #[test]
    fn test_parse_rank() {
        assert_eq!(parse_rank("1"), Ok(1));
        assert_eq!(parse_rank("42"), Ok(42));
        assert_eq!(parse_rank("0"), Err(ValidationError::RankNotPositive));
        assert_eq!(parse_rank("-3"), Err(ValidationError::RankNotPositive));
        assert_eq!(parse_rank("first"), Err(ValidationError::RankNotInteger));
        assert_eq!(parse_rank("1.5"), Err(ValidationError::RankNotInteger));
    }

    #[test]
    fn test_parse_player_id() {
        assert_eq!(parse_player_id("7"), Ok(7));
        assert_eq!(parse_player_id("0"), Err(ValidationError::IdNotPositive));
        assert_eq!(parse_player_id("abc"), Err(ValidationError::IdNotInteger));
    }

    // Update body tests
    #[test]
    fn test_parse_update_partial_fields() {
        let update = parse_update(&json!({ "score": 50 })).unwrap();
        assert_eq!(update.score, Some(50));
        assert_eq!(update.name, None);

        let update = parse_update(&json!({ "name": "Neo" })).unwrap();
        assert_eq!(update.score, None);
        assert_eq!(update.name.unwrap().as_str(), "Neo");

        assert!(parse_update(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_parse_update_rejects_country() {
        assert_eq!(
            parse_update(&json!({ "country": "US", "score": 1 })),
            Err(ValidationError::CountryImmutable)
        );
    }

    #[test]
    fn test_parse_update_rejects_bad_types() {
        assert_eq!(
            parse_update(&json!({ "score": "high" })),
            Err(ValidationError::ScoreNotInteger)
        );
        assert_eq!(
            parse_update(&json!({ "score": 1.5 })),
            Err(ValidationError::ScoreNotInteger)
        );
        assert_eq!(
            parse_update(&json!({ "name": 12 })),
            Err(ValidationError::NameNotString)
        );
        assert_eq!(
            parse_update(&json!({ "name": "" })),
            Err(ValidationError::NameEmpty)
        );
        assert_eq!(
            parse_update(&json!([1, 2])),
            Err(ValidationError::UpdateNotObject)
        );
    }
}
