//! Selection state over catalog entries.
//!
//! `selected` is user intent; `eligible` is computed from the crop
//! rectangle. They meet at one rule: an ineligible entry's selection is
//! forced off and locked, and every operation here skips ineligible
//! entries entirely. The executor re-checks eligibility on its own, so a
//! caller that sets `selected` by hand still cannot crop an ineligible
//! entry.

use crate::catalog::CatalogEntry;
use crate::types::{CropSpec, PreviewSpec};
use crate::validate;

/// Flip one entry's selection. No-op on ineligible entries and
/// out-of-range indices.
pub fn toggle(entries: &mut [CatalogEntry], index: usize) {
    if let Some(entry) = entries.get_mut(index)
        && entry.eligible
    {
        entry.selected = !entry.selected;
    }
}

/// Select every eligible entry.
pub fn select_all(entries: &mut [CatalogEntry]) {
    for entry in entries.iter_mut().filter(|e| e.eligible) {
        entry.selected = true;
    }
}

/// Deselect every eligible entry.
pub fn select_none(entries: &mut [CatalogEntry]) {
    for entry in entries.iter_mut().filter(|e| e.eligible) {
        entry.selected = false;
    }
}

/// Invert the selection across eligible entries.
pub fn invert(entries: &mut [CatalogEntry]) {
    for entry in entries.iter_mut().filter(|e| e.eligible) {
        entry.selected = !entry.selected;
    }
}

/// Select exactly the entries named by file name, deselecting everything
/// else. Names that match no catalog entry are returned; a name that
/// matches an ineligible entry leaves it deselected.
pub fn select_only(entries: &mut [CatalogEntry], names: &[String]) -> Vec<String> {
    select_none(entries);

    let mut unmatched = Vec::new();
    for name in names {
        match entries.iter_mut().find(|e| e.file_name() == *name) {
            Some(entry) if entry.eligible => entry.selected = true,
            Some(_) => {}
            None => unmatched.push(name.clone()),
        }
    }
    unmatched
}

/// Recompute eligibility after the crop rectangle or cell changed,
/// resetting selection to its default (selected iff eligible).
pub fn refresh_eligibility(entries: &mut [CatalogEntry], spec: CropSpec, preview: PreviewSpec) {
    for entry in entries.iter_mut() {
        entry.eligible = validate::entry_fits(spec, preview, entry.native);
        entry.selected = entry.eligible;
    }
}

/// Number of entries the executor would crop.
pub fn selected_count(entries: &[CatalogEntry]) -> usize {
    entries.iter().filter(|e| e.selected && e.eligible).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::types::CropRect;
    use image::DynamicImage;
    use std::path::PathBuf;

    fn entry(name: &str, width: u32, height: u32, eligible: bool) -> CatalogEntry {
        CatalogEntry {
            source_path: PathBuf::from(name),
            native: Dimensions { width, height },
            preview: DynamicImage::new_rgb8(1, 1),
            eligible,
            selected: eligible,
        }
    }

    fn selected_flags(entries: &[CatalogEntry]) -> Vec<bool> {
        entries.iter().map(|e| e.selected).collect()
    }

    #[test]
    fn toggle_flips_an_eligible_entry() {
        let mut entries = vec![entry("a.jpg", 100, 100, true)];

        toggle(&mut entries, 0);
        assert!(!entries[0].selected);

        toggle(&mut entries, 0);
        assert!(entries[0].selected);
    }

    #[test]
    fn toggle_is_a_noop_on_ineligible_entries() {
        let mut entries = vec![entry("a.jpg", 40, 40, false)];

        toggle(&mut entries, 0);
        assert!(!entries[0].selected);
    }

    #[test]
    fn toggle_out_of_range_is_a_noop() {
        let mut entries = vec![entry("a.jpg", 100, 100, true)];
        toggle(&mut entries, 5);
        assert!(entries[0].selected);
    }

    #[test]
    fn bulk_operations_never_touch_ineligible_entries() {
        let mut entries = vec![
            entry("a.jpg", 100, 100, true),
            entry("b.jpg", 40, 40, false),
            entry("c.jpg", 100, 100, true),
        ];

        select_none(&mut entries);
        assert_eq!(selected_flags(&entries), vec![false, false, false]);

        select_all(&mut entries);
        assert_eq!(selected_flags(&entries), vec![true, false, true]);

        invert(&mut entries);
        assert_eq!(selected_flags(&entries), vec![false, false, true]);
    }

    #[test]
    fn invert_flips_mixed_selection() {
        let mut entries = vec![
            entry("a.jpg", 100, 100, true),
            entry("b.jpg", 100, 100, true),
        ];
        entries[1].selected = false;

        invert(&mut entries);
        assert_eq!(selected_flags(&entries), vec![false, true]);
    }

    #[test]
    fn select_only_picks_named_entries() {
        let mut entries = vec![
            entry("a.jpg", 100, 100, true),
            entry("b.jpg", 100, 100, true),
            entry("c.jpg", 100, 100, true),
        ];

        let unmatched = select_only(&mut entries, &["c.jpg".to_string(), "a.jpg".to_string()]);

        assert!(unmatched.is_empty());
        assert_eq!(selected_flags(&entries), vec![true, false, true]);
    }

    #[test]
    fn select_only_reports_unknown_names() {
        let mut entries = vec![entry("a.jpg", 100, 100, true)];

        let unmatched = select_only(&mut entries, &["missing.jpg".to_string()]);

        assert_eq!(unmatched, vec!["missing.jpg"]);
        assert!(!entries[0].selected);
    }

    #[test]
    fn select_only_leaves_ineligible_entries_deselected() {
        let mut entries = vec![entry("small.jpg", 40, 40, false)];

        let unmatched = select_only(&mut entries, &["small.jpg".to_string()]);

        assert!(unmatched.is_empty());
        assert!(!entries[0].selected);
    }

    #[test]
    fn refresh_recomputes_eligibility_and_resets_selection() {
        let mut entries = vec![
            entry("large.jpg", 100, 100, true),
            entry("small.jpg", 40, 40, false),
        ];
        entries[0].selected = false;

        // A 30x30 rectangle fits both images; both reset to selected.
        let spec = CropSpec::OriginalScale(CropRect::new(0, 0, 30, 30));
        refresh_eligibility(&mut entries, spec, PreviewSpec::default());

        assert!(entries[0].eligible && entries[0].selected);
        assert!(entries[1].eligible && entries[1].selected);
    }

    #[test]
    fn refresh_locks_entries_the_rectangle_outgrew() {
        let mut entries = vec![entry("a.jpg", 100, 100, true)];

        let spec = CropSpec::OriginalScale(CropRect::new(0, 0, 150, 150));
        refresh_eligibility(&mut entries, spec, PreviewSpec::default());

        assert!(!entries[0].eligible);
        assert!(!entries[0].selected);
    }

    #[test]
    fn selected_count_ignores_forced_flags_on_ineligible_entries() {
        let mut entries = vec![
            entry("a.jpg", 100, 100, true),
            entry("b.jpg", 40, 40, false),
        ];
        entries[1].selected = true;

        assert_eq!(selected_count(&entries), 1);
    }
}
