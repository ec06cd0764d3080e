use crate::error::ThemeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category a theme belongs to.
///
/// Parsed case-insensitively, so `LOGIN`, `Login` and `login` all resolve to [`ThemeType::Login`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    Login,
    Account,
    Admin,
    Email,
    Welcome,
    Common,
}

impl ThemeType {
    pub const ALL: [ThemeType; 6] = [
        ThemeType::Login,
        ThemeType::Account,
        ThemeType::Admin,
        ThemeType::Email,
        ThemeType::Welcome,
        ThemeType::Common,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeType::Login => "login",
            ThemeType::Account => "account",
            ThemeType::Admin => "admin",
            ThemeType::Email => "email",
            ThemeType::Welcome => "welcome",
            ThemeType::Common => "common",
        }
    }
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeType {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ThemeError::UnknownType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("LOGIN".parse::<ThemeType>().unwrap(), ThemeType::Login);
        assert_eq!("Account".parse::<ThemeType>().unwrap(), ThemeType::Account);
        assert_eq!("admin".parse::<ThemeType>().unwrap(), ThemeType::Admin);
    }

    #[test]
    fn rejects_unknown_types() {
        let err = "dashboard".parse::<ThemeType>().unwrap_err();
        assert!(matches!(err, ThemeError::UnknownType(t) if t == "dashboard"));
        assert!("".parse::<ThemeType>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for t in ThemeType::ALL {
            assert_eq!(t.to_string().parse::<ThemeType>().unwrap(), t);
        }
    }
}
