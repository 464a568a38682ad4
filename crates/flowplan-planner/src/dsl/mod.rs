//! Graph documents: serialized element graphs for debugging and fixtures.

pub mod yaml;
