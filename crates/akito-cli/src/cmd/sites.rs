//! Sites subcommand - list available site modules

use akito_core::{Source, SourceMeta};
use akito_wuxiaworld::WuxiaWorldCo;

use super::table;

pub fn run() {
    let wuxiaworld = WuxiaWorldCo::default();
    let sites: [&SourceMeta; 1] = [wuxiaworld.meta()];

    let mut table = table(&["Name", "URL", "Type", "Languages", "Last updated"]);
    for meta in sites {
        table.add_row(vec![
            meta.name.to_string(),
            meta.url.to_string(),
            meta.kind.as_str().to_string(),
            meta.languages.join(", "),
            meta.last_updated.to_string(),
        ]);
    }
    println!("{table}");
}
