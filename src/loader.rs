use crate::diagnostics;
use crate::error::LoadError;
use crate::schema;
use crate::table;

/// Whether `raw` spells infinity (`inf`, `-Infinity`, ...) rather than a number.
fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parses one numeric field. Finite-looking text that overflows `f64`
/// (`1e400`) is a range error, not infinity.
fn parse_number(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_infinite() && !is_infinity_literal(raw) => None,
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

/// Parses the numeric fields of one row into `buffer`.
///
/// Each field is parsed on its own. A field that fails keeps 0.0 and is
/// reported to `sink`, unless its column tolerates blanks.
fn parse_numeric_fields<S: diagnostics::DiagnosticSink>(
    row: usize,
    fields: &csv::StringRecord,
    buffer: &mut [f64; schema::NUMERIC_COLUMNS],
    sink: &mut S,
) {
    for (offset, slot) in buffer.iter_mut().enumerate() {
        let raw = fields.get(offset + schema::NUMERIC_START).unwrap_or("");
        match parse_number(raw) {
            Some(value) => *slot = value,
            None => {
                *slot = 0.0;
                let Some(column) = schema::Column::from_numeric_offset(offset) else {
                    continue;
                };
                if column.blank_tolerated() {
                    continue;
                }
                sink.report(diagnostics::FieldDiagnostic {
                    row,
                    column,
                    raw: raw.to_string(),
                    value: *slot,
                });
            }
        }
    }
}

/// Parses the `date` field, falling back to [`table::zero_date`].
fn parse_date<S: diagnostics::DiagnosticSink>(
    row: usize,
    raw: &str,
    sink: &mut S,
) -> chrono::NaiveDate {
    match chrono::NaiveDate::parse_from_str(raw, schema::DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => {
            sink.report(diagnostics::FieldDiagnostic {
                row,
                column: schema::Column::Date,
                raw: raw.to_string(),
                value: 0.0,
            });
            table::zero_date()
        }
    }
}

/// Loads one stock's daily records from CSV data.
///
/// The first row must be a header with [`schema::FIELD_COUNT`] columns; it is
/// checked for width only. Every following row becomes one trading day, in
/// input order. The stock code is taken from the `code` field of the last row.
///
/// # Arguments
/// * `reader` - Source of CSV text.
/// * `sink` - Receives non-fatal field parse failures.
///
/// # Returns
/// * `Result<DayTable, LoadError>` - The table, or a fatal error if the data is
///   not a well-formed 18-column CSV.
///
/// # Errors
/// * `LoadError::Csv` if the CSV is structurally broken.
/// * `LoadError::MissingHeader` if there is no header row.
/// * `LoadError::HeaderWidth` if the header is not 18 fields wide.
/// * `LoadError::FieldCount` if a data row is not 18 fields wide.
/// * `LoadError::MalformedCode` if the last code has no `.` separator.
pub fn read_data_from_reader<R, S>(reader: R, mut sink: S) -> Result<table::DayTable, LoadError>
where
    R: std::io::Read,
    S: diagnostics::DiagnosticSink,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header_width = reader.headers()?.len();
    if header_width == 0 {
        return Err(LoadError::MissingHeader);
    }
    if header_width != schema::FIELD_COUNT {
        return Err(LoadError::HeaderWidth {
            expected: schema::FIELD_COUNT,
            found: header_width,
        });
    }

    let mut tbl = table::DayTable::default();
    let mut buffer = [0.0f64; schema::NUMERIC_COLUMNS];
    let mut code = String::new();
    let mut record = csv::StringRecord::new();
    let mut row = 0usize;

    while reader.read_record(&mut record)? {
        if record.len() != schema::FIELD_COUNT {
            return Err(LoadError::FieldCount {
                row,
                expected: schema::FIELD_COUNT,
                found: record.len(),
            });
        }

        let date = parse_date(row, &record[schema::Column::Date.index()], &mut sink);
        code.clear();
        code.push_str(&record[schema::Column::Code.index()]);
        parse_numeric_fields(row, &record, &mut buffer, &mut sink);

        tbl.push_row(date, &buffer);
        row += 1;
    }

    if !tbl.is_empty() {
        let stock_code =
            schema::split_stock_code(&code).ok_or_else(|| LoadError::MalformedCode(code.clone()))?;
        tbl.set_stock_code(stock_code);
    }

    tracing::debug!(rows = tbl.len(), stock_code = tbl.stock_code(), "loaded daily table");
    Ok(tbl)
}

/// Loads one stock's daily CSV file from `path`.
///
/// The file handle is dropped before returning, on success or failure.
/// See [`read_data_from_reader`] for the format and error cases.
pub fn read_data<P, S>(path: P, sink: S) -> Result<table::DayTable, LoadError>
where
    P: AsRef<std::path::Path>,
    S: diagnostics::DiagnosticSink,
{
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_data_from_reader(file, sink)
}
