//! Rate data as produced by readers and factories, and how it is combined.

use crate::RateTable;

/// Rate tables grouped by gender chunk.
///
/// - `len() == 1`: one list for both genders.
/// - `len() == 2`: male list at index 0, female list at index 1.
/// - `len() == 0`: no data (type disabled, or node absent from the file).
pub type RateData = Vec<Vec<RateTable>>;

/// Concatenate the rate data of several migration types for one node.
///
/// If any part is gender-split the result is gender-split, and gender-neutral
/// parts contribute their single list to both genders.  Order within each
/// gender follows the order of `parts`.
pub fn merge_rate_data<I>(parts: I) -> RateData
where
    I: IntoIterator<Item = RateData>,
{
    let parts: Vec<RateData> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    let genders = parts.iter().map(Vec::len).max().unwrap_or(0);

    let mut merged: RateData = vec![Vec::new(); genders];
    for part in &parts {
        for (g, out) in merged.iter_mut().enumerate() {
            let source = part.get(g).unwrap_or(&part[0]);
            out.extend(source.iter().cloned());
        }
    }
    merged
}
