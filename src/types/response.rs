use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct Hash {
    pub(crate) hash: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Validated {
    pub(crate) validated: bool,
}
