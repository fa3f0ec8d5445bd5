pub(crate) mod markup;
pub(crate) mod parse;
pub(crate) mod primitive;
pub(crate) mod style;
