//! The datagen table source.

use crate::config::DatagenOptions;
use crate::controller::BoundedEnumerationController;
use crate::error::{LateLimitPushError, SourceError};
use crate::explain::ScanNode;
use crate::negotiation::SupportsLimitPushDown;
use datagen_core::{Row, TableSchema};
use datagen_generator::{GeneratorRegistry, GeneratorTree, RowAssembler};
use std::path::Path;
use tracing::{debug, info, warn};

/// Synthetic row-generating table source.
///
/// Generators are built once, when the source is created. Each `open()`
/// starts a fresh execution: a new row assembler over the same generator
/// tree and a reset row counter. Limits can be pushed until the first row is
/// admitted.
///
/// ```rust
/// use datagen_core::TableSchema;
/// use datagen_source::{push_down_limit, DatagenSource};
///
/// let schema = TableSchema::from_declared("datagen_t", &[("f0", "CHAR(1)")]).unwrap();
/// let mut source = DatagenSource::new(schema).unwrap();
///
/// assert!(push_down_limit(&mut source, 5));
/// source.open();
/// assert_eq!(source.rows().unwrap().count(), 5);
/// ```
pub struct DatagenSource {
    schema: TableSchema,
    options: DatagenOptions,
    tree: GeneratorTree,
    controller: BoundedEnumerationController,
    /// Present while open
    assembler: Option<RowAssembler>,
}

impl DatagenSource {
    /// Create a source from a table schema and its attached options.
    pub fn new(schema: TableSchema) -> Result<Self, SourceError> {
        let options = DatagenOptions::from_table(&schema)?;
        Self::with_options(schema, options)
    }

    /// Load a table definition from a YAML file and create a source for it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let schema = TableSchema::from_file(path)?;
        Self::new(schema)
    }

    /// Create a source with already-parsed options.
    pub fn with_options(schema: TableSchema, options: DatagenOptions) -> Result<Self, SourceError> {
        let tree = GeneratorRegistry::new(options.generator.clone()).build(&schema)?;
        debug!(
            table = %schema.name(),
            columns = tree.len(),
            number_of_rows = ?options.number_of_rows,
            "Built datagen source"
        );

        Ok(Self {
            controller: BoundedEnumerationController::new(options.number_of_rows),
            schema,
            options,
            tree,
            assembler: None,
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn options(&self) -> &DatagenOptions {
        &self.options
    }

    pub fn generator_tree(&self) -> &GeneratorTree {
        &self.tree
    }

    pub fn is_open(&self) -> bool {
        self.assembler.is_some()
    }

    /// Rows admitted in the current (or last) execution.
    pub fn rows_emitted(&self) -> u64 {
        self.controller.rows_emitted()
    }

    /// Start an execution. Re-opening restarts the row count against the
    /// same ceiling.
    pub fn open(&mut self) {
        if self.is_open() {
            warn!(table = %self.schema.name(), "Re-opening an open datagen source");
        }
        self.controller.restart();
        self.assembler = Some(RowAssembler::new(self.tree.clone(), self.options.seed));
        info!(
            table = %self.schema.name(),
            ceiling = ?self.controller.current_limit(),
            "Opened datagen source"
        );
    }

    /// Ask whether another row may be produced; admits it if so.
    pub fn try_advance(&mut self) -> Result<bool, SourceError> {
        if !self.is_open() {
            return Err(self.not_open());
        }
        Ok(self.controller.try_advance())
    }

    /// Build the row admitted by the last successful `try_advance`.
    pub fn produce_row(&mut self) -> Result<Row, SourceError> {
        let admitted = self.controller.rows_emitted();
        let table = self.schema.name();
        match self.assembler.as_mut() {
            Some(assembler) if assembler.current_index() < admitted => {
                Ok(assembler.produce_row())
            }
            Some(_) => Err(SourceError::NotAdmitted(table.to_string())),
            None => Err(SourceError::NotOpen(table.to_string())),
        }
    }

    /// `try_advance` then `produce_row`; `None` once the budget is spent.
    pub fn next_row(&mut self) -> Result<Option<Row>, SourceError> {
        if self.try_advance()? {
            self.produce_row().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Lazy iterator over the remaining rows of the current execution.
    pub fn rows(&mut self) -> Result<RowIterator<'_>, SourceError> {
        if !self.is_open() {
            return Err(self.not_open());
        }
        Ok(RowIterator { source: self })
    }

    /// End the current execution.
    pub fn close(&mut self) {
        if self.assembler.take().is_some() {
            info!(
                table = %self.schema.name(),
                rows_emitted = self.controller.rows_emitted(),
                "Closed datagen source"
            );
        }
    }

    /// Scan node for the explained plan; shows `limit=[n]` whenever a
    /// ceiling is in force.
    pub fn explain(&self) -> String {
        ScanNode::new(&self.schema, self.controller.current_limit()).to_string()
    }

    fn not_open(&self) -> SourceError {
        SourceError::NotOpen(self.schema.name().to_string())
    }
}

impl SupportsLimitPushDown for DatagenSource {
    fn supports_limit_push_down(&self) -> bool {
        true
    }

    fn apply_limit(&mut self, limit: u64) -> Result<(), LateLimitPushError> {
        self.controller.apply_limit(limit)?;
        debug!(
            table = %self.schema.name(),
            limit,
            ceiling = ?self.controller.current_limit(),
            "Accepted pushed limit"
        );
        Ok(())
    }

    fn current_limit(&self) -> Option<u64> {
        self.controller.current_limit()
    }
}

/// Iterator that lazily produces rows until the budget is spent.
pub struct RowIterator<'a> {
    source: &'a mut DatagenSource,
}

impl Iterator for RowIterator<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        // The iterator only exists while the source is open
        self.source.next_row().ok().flatten()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.source.controller.remaining() {
            Some(remaining) => {
                let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
                (remaining, Some(remaining))
            }
            None => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::push_down_limit;
    use datagen_core::Value;

    fn source(columns: &[(&str, &str)], options: &[(&str, &str)]) -> DatagenSource {
        let mut schema = TableSchema::from_declared("datagen_t", columns).unwrap();
        for (key, value) in options {
            schema = schema.with_option(*key, *value);
        }
        DatagenSource::new(schema).unwrap()
    }

    #[test]
    fn test_number_of_rows() {
        let mut source = source(&[("f0", "CHAR(1)")], &[("number-of-rows", "10")]);
        source.open();

        let rows: Vec<Row> = source.rows().unwrap().collect();
        assert_eq!(rows.len(), 10);
        assert_eq!(source.rows_emitted(), 10);
        assert!(!source.try_advance().unwrap());
        source.close();
    }

    #[test]
    fn test_pushed_limit() {
        let mut source = source(&[("f0", "CHAR(1)")], &[("number-of-rows", "10")]);
        assert!(source.supports_limit_push_down());
        assert!(push_down_limit(&mut source, 5));
        assert_eq!(source.current_limit(), Some(5));

        source.open();
        assert_eq!(source.rows().unwrap().count(), 5);
    }

    #[test]
    fn test_explain() {
        let mut source = source(&[("f0", "CHAR(1)")], &[]);
        assert_eq!(
            source.explain(),
            "TableSourceScan(table=[[default_catalog, default_database, datagen_t]], fields=[f0])"
        );

        source.apply_limit(5).unwrap();
        assert!(source.explain().contains("limit=[5]"));
    }

    #[test]
    fn test_explain_shows_configured_total() {
        let source = source(&[("f0", "CHAR(1)")], &[("number-of-rows", "10")]);
        assert_eq!(source.current_limit(), Some(10));
        assert_eq!(
            source.explain(),
            "TableSourceScan(table=[[default_catalog, default_database, datagen_t, limit=[10]]], fields=[f0])"
        );
    }

    #[test]
    fn test_explain_shows_effective_ceiling() {
        let mut source = source(&[("f0", "CHAR(1)")], &[("number-of-rows", "3")]);
        source.apply_limit(20).unwrap();
        assert!(source.explain().contains("limit=[3]"));
    }

    #[test]
    fn test_push_after_open_before_first_row() {
        let mut source = source(&[("f0", "CHAR(1)")], &[("number-of-rows", "10")]);
        source.open();
        assert!(push_down_limit(&mut source, 3));
        assert!(source.explain().contains("limit=[3]"));
        assert_eq!(source.rows().unwrap().count(), 3);
    }

    #[test]
    fn test_produce_row_requires_admission() {
        let mut source = source(&[("f0", "CHAR(1)")], &[("number-of-rows", "1")]);
        source.open();
        assert!(matches!(source.produce_row(), Err(SourceError::NotAdmitted(_))));

        assert!(source.try_advance().unwrap());
        assert!(source.produce_row().is_ok());
        assert!(matches!(source.produce_row(), Err(SourceError::NotAdmitted(_))));
        assert!(!source.try_advance().unwrap());
        assert!(matches!(source.produce_row(), Err(SourceError::NotAdmitted(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("t.yaml");
        std::fs::write(&path, "name: t\ncolumns:\n  - name: a\n    type: INT\noptions:\n  number-of-rows: 2\n").unwrap();

        let mut source = DatagenSource::from_file(&path).unwrap();
        source.open();
        assert_eq!(source.rows().unwrap().count(), 2);

        let missing = DatagenSource::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(SourceError::Schema(_))));
    }

    #[test]
    fn test_push_after_open_rejected() {
        let mut source = source(&[("f0", "CHAR(1)")], &[("number-of-rows", "10")]);
        source.open();
        assert!(source.next_row().unwrap().is_some());

        let err = source.apply_limit(2).unwrap_err();
        assert_eq!(err.requested, 2);
        assert_eq!(err.current_limit, Some(10));
        assert_eq!(err.rows_emitted, 1);
        assert!(!push_down_limit(&mut source, 2));

        assert_eq!(source.rows().unwrap().count(), 9);
    }

    #[test]
    fn test_not_open() {
        let mut source = source(&[("f0", "CHAR(1)")], &[]);
        assert!(matches!(source.try_advance(), Err(SourceError::NotOpen(_))));
        assert!(matches!(source.produce_row(), Err(SourceError::NotOpen(_))));
        assert!(source.rows().is_err());

        source.open();
        source.close();
        assert!(matches!(source.next_row(), Err(SourceError::NotOpen(_))));
    }

    #[test]
    fn test_unbounded_continues() {
        let mut source = source(&[("f7", "INT")], &[]);
        source.open();
        assert_eq!(source.rows().unwrap().take(10_000).count(), 10_000);
        assert_eq!(source.current_limit(), None);
    }

    #[test]
    fn test_reopen_restarts_execution() {
        let mut source = source(&[("f7", "INT")], &[("number-of-rows", "4"), ("seed", "7")]);
        source.open();
        let first: Vec<Row> = source.rows().unwrap().collect();
        source.close();

        source.open();
        let second: Vec<Row> = source.rows().unwrap().collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
        assert!(source.apply_limit(1).is_err());
    }

    #[test]
    fn test_size_hint() {
        let mut source = source(&[("f0", "CHAR(1)")], &[("number-of-rows", "3")]);
        source.open();
        let mut rows = source.rows().unwrap();
        assert_eq!(rows.size_hint(), (3, Some(3)));
        rows.next();
        assert_eq!(rows.size_hint(), (2, Some(2)));
    }

    #[test]
    fn test_invalid_option_fails_creation() {
        let schema = TableSchema::from_declared("t", &[("a", "INT")])
            .unwrap()
            .with_option("fields.b.min", "1");
        assert!(matches!(
            DatagenSource::new(schema),
            Err(SourceError::InvalidOption { key, .. }) if key == "fields.b"
        ));
    }

    #[test]
    fn test_null_rate_produces_nulls() {
        let mut source = source(
            &[("a", "INT")],
            &[("number-of-rows", "200"), ("seed", "42"), ("fields.a.null-rate", "0.5")],
        );
        source.open();
        let nulls = source
            .rows()
            .unwrap()
            .filter(|row| row.get(0) == Some(&Value::Null))
            .count();
        assert!(nulls > 0 && nulls < 200);
    }
}
