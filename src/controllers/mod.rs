#[cfg(test)]
pub(crate) mod stub;
pub(crate) mod verification;
