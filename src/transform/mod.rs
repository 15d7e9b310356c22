pub(crate) mod scale;
pub(crate) mod skew;
