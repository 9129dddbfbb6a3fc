pub(crate) mod label;
pub(crate) mod theme_toggle;
pub(crate) mod wallet_status;
