pub(crate) mod leaf;
pub(crate) mod text_flow;
