pub(crate) mod postgres;
pub(crate) mod store;
