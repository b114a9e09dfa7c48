use std::io::Write;

use super::OutcomeRecord;

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub(crate) fn export_to_csv_impl(
    records: &[OutcomeRecord],
    writer: impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "ride_id",
        "status",
        "driver_id",
        "total_cost",
        "hours_to_pickup",
        "distance_to_pickup_km",
        "reason",
    ])?;

    for record in records {
        wtr.write_record([
            record.ride_id.to_string(),
            record.status.clone(),
            optional(record.driver_id),
            optional(record.total_cost),
            optional(record.hours_to_pickup),
            optional(record.distance_to_pickup_km),
            record.reason.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
