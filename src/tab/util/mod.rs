pub(crate) mod amount;
pub(crate) mod time;
