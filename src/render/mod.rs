pub(crate) mod border;
pub(crate) mod mask;
pub(crate) mod painter;
pub(crate) mod raster;
pub(crate) mod style;
pub(crate) mod surface;
pub(crate) mod surface_pool;
pub(crate) mod text;
