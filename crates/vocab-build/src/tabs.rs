//! Copy each source tab's filename into a listing sheet.

use tracing::{error, info, warn};

use vocab_model::{Diagnostics, ValidationIssue};
use vocab_sheets::{GridStore, Workbook};

use crate::config::PausePolicy;
use crate::pace::Pacer;

/// Cell holding the first metadata value (the filename) of a source tab.
pub const FILENAME_CELL: (usize, usize) = (2, 1);
/// Column of the listing sheet the filenames are written to.
pub const LISTING_COLUMN: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabListing {
    /// `(tab, filename)` in source order.
    pub entries: Vec<(String, String)>,
    pub diagnostics: Diagnostics,
}

/// Write the filename of every tab of `source_id` into successive rows of
/// `target_sheet` in `target_id`, saving after each row.
pub fn list_tab_filenames(
    store: &mut dyn GridStore,
    source_id: &str,
    target_id: &str,
    target_sheet: &str,
    pause: PausePolicy,
) -> TabListing {
    let mut listing = TabListing::default();
    let source = Workbook::open(&*store, source_id);
    let mut target = Workbook::open(&*store, target_id);
    let mut pacer = Pacer::new(pause);

    for (row, sheet) in source.sheets().iter().enumerate() {
        pacer.next_item();
        let (cell_row, cell_col) = FILENAME_CELL;
        let filename = sheet.cell(cell_row, cell_col).unwrap_or_default().to_string();
        if filename.is_empty() {
            warn!(tab = sheet.name(), "tab has no filename");
        }
        let Some(listing_sheet) = target.get_or_create_sheet(store, target_sheet) else {
            listing.diagnostics.push(ValidationIssue::error(
                "TL001",
                format!("Cannot open sheet {target_sheet} in {target_id}"),
            ));
            return listing;
        };
        listing_sheet.write_cell(row, LISTING_COLUMN, filename.as_str());
        if let Err(err) = listing_sheet.save(store, target_id) {
            error!(tab = sheet.name(), "failed to save listing: {err}");
            listing.diagnostics.push(
                ValidationIssue::error("TL002", format!("Failed to save listing row {row}: {err}"))
                    .in_sheet(target_sheet),
            );
        }
        listing.entries.push((sheet.name().to_string(), filename));
    }
    info!(tabs = listing.entries.len(), "tab filenames listed");
    listing
}
