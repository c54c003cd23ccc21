pub(crate) mod theme;
pub(crate) mod util;
