pub mod download;
pub mod info;
pub mod search;
pub mod sites;

use clap::ValueEnum;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

/// Supported websites
#[derive(Clone, Copy, ValueEnum, Debug, Default, PartialEq, Eq)]
pub enum Site {
    /// wuxiaworld.co (Chinese, aggregate)
    #[default]
    Wuxiaworld,
}

/// Table with the shared CLI look and cyan headers
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}
