pub(crate) mod expr;
pub(crate) mod state;
