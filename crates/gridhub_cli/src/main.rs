//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `gridhub_core` linkage.
//! - Print a deterministic summary of the placeholder catalog.

use gridhub_core::{sample_data_source, CatalogService, GroupConfig, ALL_GROUPS_KEY};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("gridhub_core ping={}", gridhub_core::ping());
    println!("gridhub_core version={}", gridhub_core::core_version());

    match print_catalog() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("gridhub_cli error={message}");
            ExitCode::FAILURE
        }
    }
}

fn print_catalog() -> Result<(), String> {
    let source = sample_data_source(GroupConfig::default()).map_err(|err| err.to_string())?;
    let catalog = CatalogService::new(source);
    for group in catalog
        .all_groups(ALL_GROUPS_KEY)
        .map_err(|err| err.to_string())?
    {
        println!(
            "group id={} title=\"{}\" items={} top_items=[{}]",
            group.unique_id,
            group.title,
            group.item_ids.len(),
            group.top_item_ids.join(",")
        );
    }
    Ok(())
}
