//! Grounding modes and mode resolution.
//!
//! A request can name its mode explicitly (`mode`) or through the older
//! `groundWithPosts` boolean. Resolution is a single precedence chain:
//!
//! | `mode` | `groundWithPosts` | Result |
//! |--------|-------------------|--------|
//! | set | any | that mode |
//! | unset | `false` | [`Mode::Dynamic`] |
//! | unset | `true` / unset | [`Mode::Strict`] |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How retrieved posts constrain the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Answer only from the retrieved posts; refuse otherwise.
    Strict,
    /// Posts are an optional aid next to general knowledge.
    Dynamic,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Strict => "strict",
            Mode::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Mode::Strict),
            "dynamic" => Ok(Mode::Dynamic),
            other => Err(format!(
                "unknown mode '{}': must be strict or dynamic",
                other
            )),
        }
    }
}

/// Derive the effective mode: explicit mode, else legacy flag, else strict.
pub fn resolve_mode(explicit: Option<Mode>, ground_with_posts: Option<bool>) -> Mode {
    match (explicit, ground_with_posts) {
        (Some(mode), _) => mode,
        (None, Some(false)) => Mode::Dynamic,
        (None, _) => Mode::Strict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_mode_wins_over_legacy_flag() {
        for flag in [None, Some(true), Some(false)] {
            assert_eq!(resolve_mode(Some(Mode::Strict), flag), Mode::Strict);
            assert_eq!(resolve_mode(Some(Mode::Dynamic), flag), Mode::Dynamic);
        }
    }

    #[test]
    fn legacy_false_means_dynamic() {
        assert_eq!(resolve_mode(None, Some(false)), Mode::Dynamic);
    }

    #[test]
    fn legacy_true_or_absent_means_strict() {
        assert_eq!(resolve_mode(None, Some(true)), Mode::Strict);
        assert_eq!(resolve_mode(None, None), Mode::Strict);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Strict".parse::<Mode>().unwrap(), Mode::Strict);
        assert_eq!(" dynamic ".parse::<Mode>().unwrap(), Mode::Dynamic);
        assert!("hybrid".parse::<Mode>().is_err());
        assert_eq!(Mode::Dynamic.to_string(), "dynamic");
    }

    #[test]
    fn serde_lowercase() {
        let m: Mode = serde_json::from_str("\"dynamic\"").unwrap();
        assert_eq!(m, Mode::Dynamic);
        assert_eq!(serde_json::to_string(&Mode::Strict).unwrap(), "\"strict\"");
    }
}
