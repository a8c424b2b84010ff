//! CSV export for sized configurations.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sizing::Recommendation;

/// Column header for configuration export.
const HEADER: &str = "rank,battery_id,battery_count,battery_capacity_kwh,\
                      total_capacity_kwh,inverter_id,inverter_count,\
                      total_power_kw,estimated_autonomy_h,recommended";

/// Exports every configuration of a recommendation to a CSV file.
///
/// Writes a header row, then the best configuration, then the alternatives
/// in catalog order.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(recommendation: &Recommendation, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(recommendation, buf)
}

/// Writes a recommendation as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(recommendation: &Recommendation, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for (rank, c) in recommendation.all().enumerate() {
        wtr.write_record(&[
            (rank + 1).to_string(),
            c.battery.id.clone(),
            c.battery_count.to_string(),
            format!("{:.2}", c.battery.capacity_kwh),
            format!("{:.2}", c.total_capacity_kwh),
            c.inverter.id.clone(),
            c.inverter_count.to_string(),
            format!("{:.2}", c.total_power_kw),
            format!("{:.3}", c.estimated_autonomy_hours),
            (rank == 0).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::sizing::{GridType, Requirements, size_system};

    fn reference_csv() -> String {
        let rec = size_system(
            &Requirements::new(8.0, 4.0, GridType::SinglePhase),
            &Catalog::reference(),
        );
        let mut buf = Vec::new();
        write_csv(&rec, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn header_and_rows() {
        let output = reference_csv();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines.first().copied(),
            Some(
                "rank,battery_id,battery_count,battery_capacity_kwh,total_capacity_kwh,\
                 inverter_id,inverter_count,total_power_kw,estimated_autonomy_h,recommended"
            )
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1,bat-200,4,10.24,40.96,inv-5.5,2,11.00,4.096,true"
        );
        assert_eq!(lines[2], "2,bat-100,8,5.12,40.96,inv-5.5,2,11.00,4.096,false");
    }

    #[test]
    fn output_is_parseable() {
        let output = reference_csv();
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        assert_eq!(rdr.headers().map(csv::StringRecord::len).ok(), Some(10));

        let mut recommended = 0;
        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            for i in [2, 3, 4, 6, 7, 8] {
                assert!(rec[i].parse::<f64>().is_ok(), "column {i} should be numeric");
            }
            if rec[9].parse::<bool>().expect("flag column") {
                recommended += 1;
            }
        }
        assert_eq!(recommended, 1);
    }
}
