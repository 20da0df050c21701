//! Columnar (Parquet) sample tables, decoded fully in memory.

use crate::domain::model::Record;
use crate::utils::error::Result;
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::collections::HashMap;

/// Columns of the diabetic-retinopathy sample file.
pub const SAMPLE_COLUMNS: [&str; 6] = [
    "id",
    "image_vector",
    "dr_category",
    "macular_edema",
    "image_quality",
    "gender",
];

/// Decodes a Parquet buffer into one record per row, restricted to the
/// requested columns. Every value is stringified; nulls and columns absent
/// from the file come back as empty strings.
pub fn decode_columnar(buffer: Bytes, columns: &[&str]) -> Result<Vec<Record>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(buffer)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let schema = batch.schema();
        for row in 0..batch.num_rows() {
            let mut data = HashMap::new();
            for &column in columns {
                let value = match schema.index_of(column) {
                    Ok(index) => {
                        let array = batch.column(index);
                        if array.is_null(row) {
                            String::new()
                        } else {
                            array_value_to_string(array, row)?
                        }
                    }
                    Err(_) => String::new(),
                };
                data.insert(column.to_string(), serde_json::Value::String(value));
            }
            records.push(Record { data });
        }
    }

    Ok(records)
}
