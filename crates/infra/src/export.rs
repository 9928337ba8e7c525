//! CSV export of the tabular query results.

use std::io::Write;

use serde::Serialize;

use stockroom_inventory::{Part, format_timestamp};

use crate::error::{StoreError, StoreResult};
use crate::ledger::TransactionView;

#[derive(Serialize)]
struct PartRecord<'a> {
    id: i64,
    part_number: &'a str,
    description: &'a str,
    machine_type: &'a str,
    supplier: &'a str,
    min_qty: i64,
    current_qty: i64,
    location: &'a str,
}

#[derive(Serialize)]
struct TransactionRecord<'a> {
    id: i64,
    part_number: &'a str,
    ts: String,
    user: &'a str,
    action: &'static str,
    quantity: i64,
    remarks: &'a str,
}

/// Write parts as CSV with a header row.
pub fn write_parts_csv<W: Write>(parts: &[Part], writer: W) -> StoreResult<()> {
    let mut out = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for p in parts {
        out.serialize(PartRecord {
            id: p.id.get(),
            part_number: &p.part_number,
            description: &p.description,
            machine_type: &p.machine_type,
            supplier: &p.supplier,
            min_qty: p.min_qty,
            current_qty: p.current_qty,
            location: &p.location,
        })
        .map_err(export_error)?;
    }
    if parts.is_empty() {
        out.write_record([
            "id",
            "part_number",
            "description",
            "machine_type",
            "supplier",
            "min_qty",
            "current_qty",
            "location",
        ])
        .map_err(export_error)?;
    }
    out.flush().map_err(|e| StoreError::Export(e.to_string()))
}

/// Write ledger rows as CSV with a header row.
pub fn write_transactions_csv<W: Write>(rows: &[TransactionView], writer: W) -> StoreResult<()> {
    let mut out = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for t in rows {
        out.serialize(TransactionRecord {
            id: t.id.get(),
            part_number: &t.part_number,
            ts: format_timestamp(t.ts),
            user: &t.user,
            action: t.action.as_str(),
            quantity: t.quantity,
            remarks: &t.remarks,
        })
        .map_err(export_error)?;
    }
    if rows.is_empty() {
        out.write_record(["id", "part_number", "ts", "user", "action", "quantity", "remarks"])
            .map_err(export_error)?;
    }
    out.flush().map_err(|e| StoreError::Export(e.to_string()))
}

fn export_error(e: csv::Error) -> StoreError {
    StoreError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockroom_core::{PartId, TransactionId};
    use stockroom_inventory::{Direction, PartDraft};

    #[test]
    fn parts_csv_has_header_and_quotes_commas() {
        let part = Part::from_draft(
            PartId::new(7),
            PartDraft::new("BRG-6204")
                .with_description("Bearing, sealed")
                .with_quantities(5, 12)
                .with_location("Rack A"),
        );

        let mut buf = Vec::new();
        write_parts_csv(&[part], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,part_number,description,machine_type,supplier,min_qty,current_qty,location"
        );
        assert_eq!(lines.next().unwrap(), "7,BRG-6204,\"Bearing, sealed\",,,5,12,Rack A");
        assert!(lines.next().is_none());
    }

    #[test]
    fn transactions_csv_uses_action_codes_and_second_timestamps() {
        let row = TransactionView {
            id: TransactionId::new(1),
            part_id: PartId::new(7),
            part_number: "BRG-6204".to_string(),
            ts: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(8, 30, 15)
                .unwrap(),
            user: "employee".to_string(),
            action: Direction::Out,
            quantity: 7,
            remarks: "WO#123".to_string(),
        };

        let mut buf = Vec::new();
        write_transactions_csv(&[row], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "id,part_number,ts,user,action,quantity,remarks\n1,BRG-6204,2024-03-01T08:30:15,employee,OUT,7,WO#123\n"
        );
    }

    #[test]
    fn empty_exports_still_carry_a_header() {
        let mut buf = Vec::new();
        write_transactions_csv(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "id,part_number,ts,user,action,quantity,remarks\n"
        );
    }
}
