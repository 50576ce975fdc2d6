use std::borrow::Cow;

/// Provider identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Chain identifier as used by the providers (e.g. "bsc")
pub type ChainId = Cow<'static, str>;

/// Case-insensitive comparison of two EVM addresses.
pub fn same_address(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_address_ignores_case_and_whitespace() {
        assert!(same_address(
            "0xBB4cdB9CBd36B01bD1cBaEBF2De08d9173bc095c",
            " 0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c"
        ));
        assert!(!same_address("0xabc", "0xabd"));
    }
}
