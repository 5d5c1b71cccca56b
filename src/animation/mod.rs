pub(crate) mod compose;
pub(crate) mod directive;
pub(crate) mod ease;
