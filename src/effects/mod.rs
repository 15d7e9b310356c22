pub(crate) mod blend;
pub(crate) mod filters;
pub(crate) mod gradient;
