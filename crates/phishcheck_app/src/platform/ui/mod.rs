pub mod constants;
pub mod dom;
pub mod markup;
pub mod render;
pub mod terminal;
