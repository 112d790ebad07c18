//! Rendering of snapshot rows as a console table, JSON, or CSV.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use tse_options_core::{Column, MarketRow, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Columns shown in console tables; JSON and CSV carry every column.
const TABLE_COLUMNS: [Column; 12] = [
    Column::ShortSymbol,
    Column::UnderlyingSymbol,
    Column::ContractType,
    Column::StrikePrice,
    Column::ExpirationToken,
    Column::Dte,
    Column::LastPrice,
    Column::UnderlyingLastPrice,
    Column::UnderlyingClosePrice,
    Column::Margin,
    Column::DailyReturnPct,
    Column::OtmPct,
];

const MIN_WIDTH: usize = 12;

#[derive(Serialize)]
struct SnapshotResponse<'a> {
    data: &'a [&'a MarketRow],
    last_update: String,
    total_rows: usize,
}

/// Writes `rows` from `snapshot` in the requested format.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn write_rows<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    rows: &[&MarketRow],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, snapshot, rows),
        OutputFormat::Json => write_json(out, snapshot, rows),
        OutputFormat::Csv => write_csv(out, rows),
    }
}

fn column_width(column: Column) -> usize {
    column.name().len().max(MIN_WIDTH)
}

fn write_table<W: Write>(out: &mut W, snapshot: &Snapshot, rows: &[&MarketRow]) -> Result<()> {
    let width: usize = TABLE_COLUMNS.iter().map(|c| column_width(*c) + 1).sum();

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(width))?;
    writeln!(
        out,
        "MARKET SNAPSHOT  last update: {}  rows: {}",
        snapshot.last_update(),
        rows.len()
    )?;
    writeln!(out, "{}", "=".repeat(width))?;

    for column in TABLE_COLUMNS {
        write!(out, "{:<w$} ", column.name(), w = column_width(column))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(width))?;

    for row in rows {
        for column in TABLE_COLUMNS {
            let cell = column.value(row).to_string();
            write!(out, "{:<w$} ", cell, w = column_width(column))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "=".repeat(width))?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, snapshot: &Snapshot, rows: &[&MarketRow]) -> Result<()> {
    let response = SnapshotResponse {
        data: rows,
        last_update: snapshot.last_update(),
        total_rows: rows.len(),
    };
    serde_json::to_writer_pretty(&mut *out, &response)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, rows: &[&MarketRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(Column::ALL.map(Column::name))?;

    for row in rows {
        writer.write_record(Column::ALL.iter().map(|c| c.value(row).to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use tse_options_core::{ContractType, Dte};

    fn snapshot() -> Snapshot {
        let mut call = MarketRow::new(311, "ضفلا1", "اختيارخ فولاد-5100-14040101", 0, 100);
        call.contract_type = ContractType::Call;
        call.strike_price = 5100;
        call.expiration_token = "14040101".to_string();
        call.underlying_symbol = Some("فولاد".to_string());
        call.underlying_close_price = 5000;
        call.dte = Dte::Days(10);
        call.margin = 910_000;
        call.daily_return_pct = Some(dec!(1.23));
        call.otm_pct = Some(dec!(2.00));

        let base = MarketRow::new(270, "فولاد", "فولاد مباركه", 5000, 5100);
        let at = chrono_tz::Asia::Tehran
            .with_ymd_and_hms(2025, 3, 11, 9, 15, 0)
            .unwrap();
        Snapshot::new(vec![call, base], at)
    }

    fn render(format: OutputFormat) -> String {
        let snap = snapshot();
        let rows: Vec<&MarketRow> = snap.rows.iter().collect();
        let mut out = Vec::new();
        write_rows(&mut out, &snap, &rows, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_json_shape() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(value["last_update"], "2025-03-11 09:15:00");
        assert_eq!(value["total_rows"], 2);
        assert_eq!(value["data"][0]["margin"], 910_000);
        assert_eq!(value["data"][0]["dte"], 10);
        assert_eq!(value["data"][1]["dte"], "NA");
        assert!(value["data"][1]["otm_pct"].is_null());
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let text = render(OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("industry_code,short_symbol,full_name"));
        assert!(lines[1].ends_with(",10,910000,1.23,2.00"));
        assert!(lines[2].ends_with(",NA,0,NA,NA"));
    }

    #[test]
    fn test_table_lists_rows() {
        let text = render(OutputFormat::Table);
        assert!(text.contains("last update: 2025-03-11 09:15:00"));
        assert!(text.contains("rows: 2"));
        assert!(text.contains("ضفلا1"));
        assert!(text.contains("910000"));
    }
}
