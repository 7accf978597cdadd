//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_entry_detail, format_entry_list, format_facets, format_profile, format_tag_list,
};
