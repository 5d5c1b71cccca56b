pub(crate) mod bundle;
pub(crate) mod migrate;
pub(crate) mod snapshot;
pub(crate) mod storage;
pub(crate) mod workspace;
