use serde::{Deserialize, Deserializer};

use crate::core::error::Error;
use crate::types::Username;

#[derive(Debug, Deserialize)]
pub(crate) struct UsernameParams {
    /// Outer `None` when the key is absent, inner `None` for an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub(crate) username: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UsernameParams {
    pub(crate) fn from_body(body: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(body)?)
    }

    pub(crate) fn username(&self) -> Result<Username, Error> {
        // null counts as a blank value, not a missing key
        Username::parse(
            self.username
                .as_ref()
                .map(|value| value.as_deref().unwrap_or_default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::InvalidInput;

    #[test]
    fn test_from_body() {
        let params = UsernameParams::from_body(br#"{"username": "john doe"}"#).unwrap();
        assert_eq!(params.username().unwrap().as_str(), "john%20doe");
    }

    #[test]
    fn test_from_body_rejects_empty_and_invalid() {
        assert!(matches!(
            UsernameParams::from_body(b""),
            Err(Error::MalformedBody(_))
        ));
        assert!(matches!(
            UsernameParams::from_body(b"username=foo"),
            Err(Error::MalformedBody(_))
        ));
    }

    #[test]
    fn test_missing_username() {
        let params = UsernameParams::from_body(b"{}").unwrap();
        assert!(matches!(
            params.username(),
            Err(Error::InvalidInput(InvalidInput::MissingUsername))
        ));
    }

    #[test]
    fn test_null_username_is_blank() {
        let params = UsernameParams::from_body(br#"{"username": null}"#).unwrap();
        assert!(matches!(
            params.username(),
            Err(Error::InvalidInput(InvalidInput::BlankUsername))
        ));
    }

    #[test]
    fn test_empty_username_is_blank() {
        let params = UsernameParams::from_body(br#"{"username": ""}"#).unwrap();
        assert!(matches!(
            params.username(),
            Err(Error::InvalidInput(InvalidInput::BlankUsername))
        ));
    }
}
