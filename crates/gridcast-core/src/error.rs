// Report-level configuration errors.
//
// Missing entities inside league data never error (they degrade to
// placeholders). These are the cases where a report cannot be produced for
// the user who asked for it.

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("league id is not configured (set league_id in config/league.toml or LEAGUE_ID)")]
    MissingLeagueId,

    #[error("no league member matches '{name}'")]
    UnknownUser { name: String },

    #[error("'{name}' matches several league members: {}", .candidates.join(", "))]
    AmbiguousUser {
        name: String,
        candidates: Vec<String>,
    },

    #[error("league member '{name}' does not own a roster")]
    NoRoster { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_user() {
        let err = ReportError::UnknownUser {
            name: "ghost".into(),
        };
        assert_eq!(err.to_string(), "no league member matches 'ghost'");

        let err = ReportError::AmbiguousUser {
            name: "sam".into(),
            candidates: vec!["u1".into(), "u2".into()],
        };
        assert_eq!(err.to_string(), "'sam' matches several league members: u1, u2");
    }
}
