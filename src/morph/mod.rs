pub(crate) mod config;
pub(crate) mod diff;
pub(crate) mod driver;
