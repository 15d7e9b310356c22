pub(crate) mod figure;
pub(crate) mod mask;
pub(crate) mod style;
