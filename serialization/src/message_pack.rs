//! Thin MessagePack reader/writer over the `rmp` primitives.

mod reader;
mod writer;

pub use self::{reader::*, writer::*};

#[cfg(test)]
mod tests;
