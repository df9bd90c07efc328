use std::path::PathBuf;

/// Tab configs
#[derive(Debug, Clone)]
pub(crate) struct TabConfig {
    /// directory saved bills are written into
    pub bills_dir: PathBuf,
    /// skip the naming prompt when set
    pub bill_name: Option<String>,
}

impl TabConfig {
    pub fn new(bills_dir: PathBuf, bill_name: Option<String>) -> Self {
        Self {
            bills_dir,
            bill_name,
        }
    }
}
