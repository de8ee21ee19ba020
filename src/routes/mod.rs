pub(crate) mod router;
pub(crate) mod verification;
