//! CLI subcommands

pub mod decode;
pub mod dedup;
pub mod encode;
pub mod inspect;
