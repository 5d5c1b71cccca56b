pub(crate) mod export;
pub(crate) mod html;
pub(crate) mod markdown;
pub(crate) mod pages;
pub(crate) mod viewer;
