pub mod common;
pub mod mcp;
pub mod ods;
pub mod records;
pub mod tools;
