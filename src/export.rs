use crate::error::{DashboardError, Result};
use crate::loader::{DATE_COLUMN, DATE_FORMAT, PRICE_COLUMN, REGION_COLUMN, TYPE_COLUMN, VOLUME_COLUMN};
use crate::record::Record;

/// Convert records to CSV
///
/// Writes the five dashboard columns with the loader's header names, so the
/// output can be loaded back with [`crate::loader::load_from_reader`].
///
/// # Arguments
/// * `records` - Records to export, usually a filter result
///
/// # Returns
/// * `Result<String>` - CSV content as a string or an error
///
/// # Examples
/// ```
/// use avocado_dashboard::export::to_csv;
/// use avocado_dashboard::record::Record;
///
/// let csv = to_csv(std::iter::empty::<&Record>()).unwrap();
/// assert_eq!(csv, "Date,AveragePrice,Total Volume,type,region\n");
/// ```
pub fn to_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let export_err = |e: csv::Error| DashboardError::Export(e.to_string());
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([DATE_COLUMN, PRICE_COLUMN, VOLUME_COLUMN, TYPE_COLUMN, REGION_COLUMN])
        .map_err(export_err)?;

    for record in records {
        writer
            .write_record([
                record.date.format(DATE_FORMAT).to_string(),
                record.average_price.to_string(),
                record.total_volume.to_string(),
                record.kind.to_string(),
                record.region.clone(),
            ])
            .map_err(export_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DashboardError::Export(e.to_string()))
}
