pub(crate) mod anchor;
pub(crate) mod figure;
pub(crate) mod filter;
pub(crate) mod gradient;
pub(crate) mod mask;
pub(crate) mod style;
