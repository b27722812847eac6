//! CSV rendering for the date-range report export.
//!
//! Text cells are wrapped in double quotes but embedded quotes and commas are
//! not escaped, so a value containing `"` produces a malformed line.

use crate::models::ReportDetailRow;
use chrono::NaiveDate;
use std::fmt::Write;

pub const CSV_HEADER: &str = "ID Cliente,Nombre Cliente,Servicio,Proveedor,Fecha Compra,Fecha Vencimiento,Costo,Venta,Ganancia,Margen %";

pub fn render_csv(rows: &[ReportDetailRow]) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 128);
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for row in rows {
        // writing into a String cannot fail
        let _ = writeln!(
            csv,
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",{:.2},{:.2},{:.2},{:.2}",
            row.client_id,
            row.client_name,
            row.service_name,
            row.provider,
            row.purchase_date,
            row.expiration_date,
            row.purchase_price,
            row.sale_price,
            row.profit,
            row.margin_percentage,
        );
    }
    csv
}

pub fn export_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!("reporte_{start}_{end}.csv")
}
