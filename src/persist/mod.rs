pub(crate) mod repository;
pub(crate) mod store;
