pub(crate) mod focus;
pub(crate) mod gain;
