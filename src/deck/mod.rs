#[allow(clippy::module_inception)]
pub(crate) mod deck;
pub(crate) mod ingest;
pub(crate) mod presentation;
