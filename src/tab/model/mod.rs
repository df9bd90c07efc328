pub(crate) mod bill;
pub(crate) mod config;
