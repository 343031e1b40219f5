//! Sales record source.
//!
//! Reads the flat sales export (header row, then `date,sku,unitPrice,quantity,totalPrice`
//! in that fixed order) into [`SaleRecord`]s. Every field is parsed explicitly and the
//! whole batch is rejected on the first malformed value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use models::SaleRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const COLUMNS: [&str; 5] = ["date", "sku", "unitPrice", "quantity", "totalPrice"];

/// Largest accepted magnitude for a price. Keeps monthly and grand totals finite.
pub const MAX_AMOUNT: f64 = 1e12;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected {expected} columns in header, found {found}")]
    Header { expected: usize, found: usize },
    #[error("line {line}: invalid {field} '{value}': {reason}")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Opens `path` and parses it as a sales export.
pub fn read_sales_file<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>, ImportError> {
    let file = File::open(path.as_ref())?;
    let records = parse_sales_csv(file)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        records = records.len(),
        "loaded sales records"
    );
    Ok(records)
}

/// Parses a sales export. Empty input (or a header alone) yields no records.
pub fn parse_sales_csv<R: Read>(reader: R) -> Result<Vec<SaleRecord>, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let header_len = rdr.headers()?.len();
    if header_len == 0 {
        return Ok(Vec::new());
    }
    if header_len != COLUMNS.len() {
        return Err(ImportError::Header {
            expected: COLUMNS.len(),
            found: header_len,
        });
    }

    let mut result = Vec::new();
    for row in rdr.records() {
        result.push(parse_row(&row?)?);
    }
    Ok(result)
}

fn parse_row(row: &StringRecord) -> Result<SaleRecord, ImportError> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    let field = |idx: usize| row.get(idx).unwrap_or_default();
    let invalid = |name: &'static str, value: &str, reason: String| ImportError::InvalidField {
        line,
        field: name,
        value: value.to_string(),
        reason,
    };

    let date = parse_date(field(0)).ok_or_else(|| {
        invalid(COLUMNS[0], field(0), "unrecognised date format".to_string())
    })?;

    let sku = field(1);
    if sku.is_empty() {
        return Err(invalid(COLUMNS[1], sku, "sku is empty".to_string()));
    }

    let unit_price =
        parse_amount(field(2)).map_err(|reason| invalid(COLUMNS[2], field(2), reason))?;
    let quantity = field(3)
        .parse::<u32>()
        .map_err(|e| invalid(COLUMNS[3], field(3), e.to_string()))?;
    let total_price =
        parse_amount(field(4)).map_err(|reason| invalid(COLUMNS[4], field(4), reason))?;

    Ok(SaleRecord {
        date,
        sku: sku.to_string(),
        unit_price,
        quantity,
        total_price,
    })
}

/// Parses plain dates (`YYYY-MM-DD`, `YYYY/MM/DD`) and timestamps, keeping only the day.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_amount(s: &str) -> Result<f64, String> {
    let v = s.parse::<f64>().map_err(|e| e.to_string())?;
    if !v.is_finite() {
        return Err("amount is not a finite number".to_string());
    }
    if v.abs() > MAX_AMOUNT {
        return Err(format!("amount exceeds {MAX_AMOUNT}"));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Date,SKU,Unit Price,Quantity,Total Price
2019-01-01,Death by Chocolate,180,5,900
2019-01-01,Cake Fudge,150,1,150
2019-02-03,Vanilla Double Scoop,80,3,240
";

    #[test]
    fn test_parse_sample_export() {
        let records = parse_sales_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.date.to_string(), "2019-01-01");
        assert_eq!(first.sku, "Death by Chocolate");
        assert_eq!(first.unit_price, 180.0);
        assert_eq!(first.quantity, 5);
        assert_eq!(first.total_price, 900.0);
        assert_eq!(records[2].month(), "2019-02");
    }

    #[test]
    fn test_columns_are_positional_not_named() {
        let input = "a,b,c,d,e\n2024-01-05,A,10,2,20\n";
        let records = parse_sales_csv(input.as_bytes()).unwrap();
        assert_eq!(records[0].sku, "A");
        assert_eq!(records[0].quantity, 2);
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(parse_sales_csv("".as_bytes()).unwrap().is_empty());
        assert!(parse_sales_csv("date,sku,unitPrice,quantity,totalPrice\n".as_bytes())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_crlf_and_padding_tolerated() {
        let input = "date,sku,unitPrice,quantity,totalPrice\r\n 2024-01-05 , A , 10 , 2 , 20 \r\n";
        let records = parse_sales_csv(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sku, "A");
        assert_eq!(records[0].total_price, 20.0);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 9, 10).unwrap();
        assert_eq!(parse_date("2024-09-10"), Some(expected));
        assert_eq!(parse_date("2024/09/10"), Some(expected));
        assert_eq!(parse_date("2024-09-10T23:15:00Z"), Some(expected));
        assert_eq!(parse_date("2024-09-10T08:00:00+02:00"), Some(expected));
        assert_eq!(parse_date("2024-09-10 08:00:00"), Some(expected));
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_invalid_quantity_fails_batch() {
        let input = "date,sku,unitPrice,quantity,totalPrice\n2024-01-05,A,10,2,20\n2024-01-06,A,10,-1,-10\n";
        let err = parse_sales_csv(input.as_bytes()).unwrap_err();
        match err {
            ImportError::InvalidField {
                line, field, value, ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(field, "quantity");
                assert_eq!(value, "-1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quantity_above_u32_rejected() {
        let input = "date,sku,unitPrice,quantity,totalPrice\n2024-01-05,A,0,18446744073709551615,0\n";
        let err = parse_sales_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidField {
                field: "quantity",
                line: 2,
                ..
            }
        ));

        let max = format!(
            "date,sku,unitPrice,quantity,totalPrice\n2024-01-05,A,0,{},0\n",
            u32::MAX
        );
        assert_eq!(parse_sales_csv(max.as_bytes()).unwrap()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_oversized_amount_rejected() {
        let input = "date,sku,unitPrice,quantity,totalPrice\n2024-01-05,A,1,1,1e300\n";
        let err = parse_sales_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidField {
                field: "totalPrice",
                ..
            }
        ));

        let at_bound = "date,sku,unitPrice,quantity,totalPrice\n2024-01-05,A,1,1,-1000000000000\n";
        assert_eq!(
            parse_sales_csv(at_bound.as_bytes()).unwrap()[0].total_price,
            -MAX_AMOUNT
        );
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let input = "date,sku,unitPrice,quantity,totalPrice\n2024-01-05,A,NaN,2,20\n";
        let err = parse_sales_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidField {
                field: "unitPrice",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_date_and_empty_sku_rejected() {
        let bad_date = "date,sku,unitPrice,quantity,totalPrice\nnot-a-date,A,10,2,20\n";
        assert!(matches!(
            parse_sales_csv(bad_date.as_bytes()).unwrap_err(),
            ImportError::InvalidField { field: "date", .. }
        ));

        let empty_sku = "date,sku,unitPrice,quantity,totalPrice\n2024-01-05,,10,2,20\n";
        assert!(matches!(
            parse_sales_csv(empty_sku.as_bytes()).unwrap_err(),
            ImportError::InvalidField { field: "sku", .. }
        ));
    }

    #[test]
    fn test_wrong_column_count() {
        let short_header = "date,sku,quantity\n2024-01-05,A,2\n";
        assert!(matches!(
            parse_sales_csv(short_header.as_bytes()).unwrap_err(),
            ImportError::Header {
                expected: 5,
                found: 3
            }
        ));

        let short_row = "date,sku,unitPrice,quantity,totalPrice\n2024-01-05,A,10,2\n";
        assert!(matches!(
            parse_sales_csv(short_row.as_bytes()).unwrap_err(),
            ImportError::Csv(_)
        ));
    }

    #[test]
    fn test_read_sales_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let records = read_sales_file(file.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_sales_file(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
