//! Human-readable run report.

use crate::error::PostnrResult;
use crate::reconcile::context::RunSummary;

/// Renders the fixed-format multi-line run report.
///
/// Pure function over the summary: counters, the deletion-candidate id lists,
/// and the two change-sets as JSON maps of `id -> [old owner, new owner]`.
/// Printing or logging the report is the caller's business.
pub fn render_report(summary: &RunSummary) -> PostnrResult<String> {
    let municipalities_to_delete = summary
        .municipalities_to_delete
        .iter()
        .map(|municipality| municipality.id.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let zip_codes_to_delete = summary
        .zip_codes_to_delete
        .iter()
        .map(|zip_code| zip_code.id.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let municipality_moves = serde_json::to_string(&summary.municipality_moves)?;
    let zip_code_moves = serde_json::to_string(&summary.zip_code_moves)?;

    Ok(format!(
        "Updated: {}\n\
         Added: {}\n\
         Municipalities to delete: {municipalities_to_delete}\n\
         Zip codes to delete: {zip_codes_to_delete}\n\
         Municipalities with changed counties: {municipality_moves}\n\
         Zip codes with changed municipality: {zip_code_moves}",
        summary.changed, summary.added,
    ))
}
