use crate::schema;

/// A field that could not be parsed and was stored as its zero value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDiagnostic {
    /// Data row index, 0-based, header excluded.
    pub row: usize,
    pub column: schema::Column,
    /// Text found in the file.
    pub raw: String,
    /// Numeric value stored in place of the field. Dates fall back to
    /// [`zero_date`](crate::table::zero_date) and report 0.0 here.
    pub value: f64,
}

impl FieldDiagnostic {
    /// Position of the field as printed in console output: its offset among
    /// the numeric fields (`open` is 0, `turn` is 8), or the column name for
    /// `date`.
    pub fn position(&self) -> String {
        match self.column.numeric_offset() {
            Some(offset) => offset.to_string(),
            None => self.column.name().to_string(),
        }
    }

    /// The two console lines written by [`StdoutSink`], newline-terminated.
    pub fn console_lines(&self) -> String {
        format!(
            "err at ({}, {})\nparsed value = {:.6}\n",
            self.row,
            self.position(),
            self.value
        )
    }
}

impl std::fmt::Display for FieldDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "err at ({}, {}) [{}] {:?}, parsed value = {:.6}",
            self.row,
            self.position(),
            self.column,
            self.raw,
            self.value,
        )
    }
}

/// Receives non-fatal field parse failures during a load.
///
/// The loader never prints on its own; pick a sink to decide where
/// diagnostics go.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: FieldDiagnostic);
}

/// Collects diagnostics for later inspection.
impl DiagnosticSink for Vec<FieldDiagnostic> {
    fn report(&mut self, diagnostic: FieldDiagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: FieldDiagnostic) {
        (**self).report(diagnostic);
    }
}

/// Prints each diagnostic to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn report(&mut self, diagnostic: FieldDiagnostic) {
        print!("{}", diagnostic.console_lines());
    }
}

/// Emits each diagnostic as a `tracing` warning, tagged with the source file.
#[derive(Debug, Default, Clone)]
pub struct TracingSink {
    source: String,
}

impl TracingSink {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: FieldDiagnostic) {
        tracing::warn!(
            source = %self.source,
            row = diagnostic.row,
            column = %diagnostic.column,
            raw = %diagnostic.raw,
            "unparseable field, stored {}",
            diagnostic.value
        );
    }
}

/// Discards diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: FieldDiagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldDiagnostic {
        FieldDiagnostic {
            row: 3,
            column: schema::Column::Low,
            raw: "n/a".to_string(),
            value: 0.0,
        }
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<FieldDiagnostic> = Vec::new();
        sink.report(sample());
        sink.report(sample());
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].column, schema::Column::Low);
    }

    fn feed<S: DiagnosticSink>(mut sink: S) {
        sink.report(sample());
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut collected: Vec<FieldDiagnostic> = Vec::new();
        feed(&mut collected);
        feed(&mut collected);
        assert_eq!(collected, vec![sample(), sample()]);
    }

    #[test]
    fn test_printing_sinks_accept_reports() {
        feed(StdoutSink);
        feed(TracingSink::new("sh.600000.csv"));
        feed(NullSink);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "err at (3, 2) [low] \"n/a\", parsed value = 0.000000"
        );
    }

    #[test]
    fn test_console_lines_use_numeric_offset() {
        let high = FieldDiagnostic {
            row: 0,
            column: schema::Column::High,
            raw: "abc".to_string(),
            value: 0.0,
        };
        assert_eq!(high.console_lines(), "err at (0, 1)\nparsed value = 0.000000\n");

        let date = FieldDiagnostic {
            row: 7,
            column: schema::Column::Date,
            raw: "02/01/2020".to_string(),
            value: 0.0,
        };
        assert_eq!(date.console_lines(), "err at (7, date)\nparsed value = 0.000000\n");
    }
}
