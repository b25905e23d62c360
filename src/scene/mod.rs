pub(crate) mod context;
pub(crate) mod node;
pub(crate) mod traverse;
pub(crate) mod widget;
