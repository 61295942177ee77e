//! Table → JSON-safe row objects.

use serde_json::{Map, Value};

use crate::types::{CellValue, Table};

/// Render a table as a list of row objects keyed by column name, in sheet
/// order. Dates render as `YYYY-MM-DD`, times as `HH:MM:SS`, nulls and
/// non-finite numbers as JSON null. An empty table is `[]`, never null.
pub fn to_json_rows(table: &Table) -> Vec<Value> {
    table
        .rows()
        .map(|row| {
            let mut object = Map::with_capacity(table.columns().len());
            for (name, cell) in table.columns().iter().zip(row) {
                object.insert(name.clone(), cell_to_json(cell));
            }
            Value::Object(object)
        })
        .collect()
}

pub fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Text(s) => Value::String(s.clone()),
        CellValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        CellValue::Time(t) => Value::String(t.format("%H:%M:%S").to_string()),
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Null => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;

    #[test]
    fn test_cell_rendering() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(cell_to_json(&CellValue::Date(d)), json!("2024-03-05"));

        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(cell_to_json(&CellValue::Time(t)), json!("09:05:00"));

        assert_eq!(cell_to_json(&CellValue::Null), Value::Null);
        assert_eq!(cell_to_json(&CellValue::Number(f64::NAN)), Value::Null);
        assert_eq!(cell_to_json(&CellValue::Bool(false)), json!(false));
    }

    #[test]
    fn test_empty_table_is_empty_sequence() {
        let table = Table::new(vec!["Name".to_string()]);
        assert_eq!(to_json_rows(&table), Vec::<Value>::new());
    }

    #[test]
    fn test_rows_keep_column_order() {
        let mut table = Table::new(vec!["b".to_string(), "a".to_string()]);
        table.push_row(vec![CellValue::Number(1.0), CellValue::Number(2.0)]);

        let rows = to_json_rows(&table);
        let keys: Vec<&String> = rows[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
