pub(crate) mod theme;
pub(crate) mod wallet;
