pub(crate) mod placer;
pub(crate) mod viewport;
