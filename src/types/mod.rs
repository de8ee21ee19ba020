pub(crate) mod request;
pub(crate) mod response;

use std::fmt::Display;

use rand::Rng;

use crate::core::error::{Error, InvalidInput};

/// A username as it is used for store keys and profile lookups.
///
/// Literal spaces are replaced with `%20` since the value is appended to the
/// profile URL as-is. No other characters are escaped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Username(String);

impl Username {
    /// `None` means the `username` key was absent from the request,
    /// which is reported separately from an empty value.
    pub(crate) fn parse(raw: Option<&str>) -> Result<Self, Error> {
        let raw = raw.ok_or(Error::InvalidInput(InvalidInput::MissingUsername))?;

        if raw.is_empty() {
            return Err(Error::InvalidInput(InvalidInput::BlankUsername));
        }

        Ok(Self(raw.replace(' ', "%20")))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 32 lowercase hex characters rendered from 128 random bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token(String);

impl Token {
    pub(crate) const LENGTH: usize = 32;

    /// Uses `ThreadRng`, which is a CSPRNG, so tokens are not guessable
    /// during the validation window.
    pub(crate) fn generate() -> Self {
        let bytes: [u8; Token::LENGTH / 2] = rand::rng().random();

        Self(hex::encode(bytes))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}
