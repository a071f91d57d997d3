//! Database entities module

pub mod helpful_vote;
pub mod movie;
pub mod review;
pub mod user;
pub mod user_preference;
pub mod watchlist;

pub use helpful_vote::Entity as HelpfulVote;
pub use movie::Entity as Movie;
pub use review::Entity as Review;
pub use user::Entity as User;
pub use user_preference::Entity as UserPreference;
pub use watchlist::Entity as Watchlist;

/// Multi-value columns are stored as JSON array text so that SQLite can
/// match single elements with `LIKE '%"value"%'`.
pub(crate) fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_columns_round_trip_and_tolerate_garbage() {
        let values = vec!["Sci-Fi".to_string(), "Drama".to_string()];
        assert_eq!(encode_list(&values), r#"["Sci-Fi","Drama"]"#);
        assert_eq!(decode_list(&encode_list(&values)), values);
        assert!(decode_list("not json").is_empty());
    }
}
