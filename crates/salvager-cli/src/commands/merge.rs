//! Merge-catalog command implementation.

use crate::cli::MergeCatalogArgs;
use crate::error::Result;
use crate::output::Formatter;
use salvager_catalog::{
    collect_pages, merge_items, read_items_file, read_page, write_items_file, MergeReport,
};
use tracing::info;

/// Execute the merge-catalog command.
pub fn execute_merge_catalog(args: MergeCatalogArgs, formatter: &Formatter) -> Result<()> {
    let report = merge_catalog(&args)?;
    println!("{}", formatter.format_merge_report(&report)?);
    Ok(())
}

/// Read the existing catalog and pages, merge, and write the result.
pub fn merge_catalog(args: &MergeCatalogArgs) -> Result<MergeReport> {
    let existing = read_items_file(&args.existing)?;
    info!("Loaded {} existing items", existing.len());

    let pages = args
        .pages
        .iter()
        .map(|path| read_page(path))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let api_items = collect_pages(pages);
    info!("Collected {} items from {} page file(s)", api_items.len(), args.pages.len());

    let (merged, report) = merge_items(&api_items, &existing);

    let output = args.output.as_ref().unwrap_or(&args.existing);
    write_items_file(output, &merged)?;

    Ok(report)
}
