use ethers::types::U256;

/// Decimals of the native currency on every EVM chain we display.
pub const ETHER_DECIMALS: usize = 18;

/// Formats a wei amount as a fixed-point decimal string with exactly
/// `decimals` fractional digits, rounding half up.
pub fn format_balance(wei: U256, decimals: usize) -> String {
    let decimals = decimals.min(ETHER_DECIMALS);
    let unit = U256::exp10(ETHER_DECIMALS - decimals);
    let scaled = wei.saturating_add(unit / 2) / unit;
    let (whole, fraction) = scaled.div_mod(U256::exp10(decimals));
    if decimals == 0 {
        return whole.to_string();
    }
    format!("{}.{:0>width$}", whole, fraction.to_string(), width = decimals)
}
