use crate::dataset::Dataset;
use crate::record::Record;
use crate::selection::Selection;

/// Return the records matching a selection, in dataset order
///
/// A record is kept iff its region and type equal the selection's and its
/// date lies in `start_date..=end_date`. The date window is located by
/// binary search over the date-sorted dataset, the remaining clauses are
/// checked per record. No match is a valid result: the charts render empty.
///
/// # Arguments
/// * `dataset` - The loaded dataset
/// * `selection` - Region, type and inclusive date range to keep
///
/// # Returns
/// * `Vec<&Record>` - Borrowed view of the matching records
pub fn filter<'a>(dataset: &'a Dataset, selection: &Selection) -> Vec<&'a Record> {
    if selection.start_date > selection.end_date {
        return Vec::new();
    }

    let records = dataset.records();
    let lo = records.partition_point(|r| r.date < selection.start_date);
    let hi = records.partition_point(|r| r.date <= selection.end_date);

    records[lo..hi]
        .iter()
        .filter(|r| selection.matches(r))
        .collect()
}

/// Materialise a filter result as a standalone dataset
pub fn filter_as_dataset(dataset: &Dataset, selection: &Selection) -> Dataset {
    Dataset::from_records(filter(dataset, selection).into_iter().cloned().collect())
}
