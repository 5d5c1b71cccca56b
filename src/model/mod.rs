pub(crate) mod asset;
pub(crate) mod order;
pub(crate) mod section;
