pub(crate) mod helper {
    #[cfg(not(test))]
    pub use super::get_utc_now;
    #[cfg(test)]
    pub use super::mock_chrono::get_utc_now;
    #[cfg(test)]
    pub use super::mock_chrono::set_utc_now;
}


#[cfg(not(test))]
pub fn get_utc_now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

#[cfg(test)]
mod tests {
    use super::helper;

    #[test]
    fn mocked_clock_follows_set_value() {
        helper::set_utc_now(1_700_000_000);
        assert_eq!(helper::get_utc_now().timestamp(), 1_700_000_000);
        helper::set_utc_now(0);
        assert_eq!(helper::get_utc_now().timestamp(), 0);
    }
}
