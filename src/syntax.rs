//! Reading and writing Qt Linguist TS documents.

pub mod escape;
pub mod reader;
pub mod writer;

pub use reader::{
    ParseError,
    parse,
};
pub use writer::to_xml;
