//! Plan introspection for the scan node.

use datagen_core::TableSchema;
use std::fmt;

/// Scan node as rendered in an explained plan, e.g.
/// `TableSourceScan(table=[[default_catalog, default_database, datagen_t, limit=[5]]], fields=[f0])`.
#[derive(Debug, Clone, Copy)]
pub struct ScanNode<'a> {
    schema: &'a TableSchema,
    limit: Option<u64>,
}

impl<'a> ScanNode<'a> {
    /// `limit` is rendered only when set.
    pub fn new(schema: &'a TableSchema, limit: Option<u64>) -> Self {
        Self { schema, limit }
    }
}

impl fmt::Display for ScanNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TableSourceScan(table=[[{}, {}, {}",
            self.schema.catalog(),
            self.schema.database(),
            self.schema.name()
        )?;
        if let Some(limit) = self.limit {
            write!(f, ", limit=[{limit}]")?;
        }
        write!(f, "]], fields=[{}])", self.schema.column_names().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_limit() {
        let schema = TableSchema::from_declared("datagen_t", &[("f0", "CHAR(1)")]).unwrap();
        assert_eq!(
            ScanNode::new(&schema, Some(5)).to_string(),
            "TableSourceScan(table=[[default_catalog, default_database, datagen_t, limit=[5]]], fields=[f0])"
        );
    }

    #[test]
    fn test_render_without_limit() {
        let schema = TableSchema::from_declared("t", &[("a", "INT"), ("b", "STRING")])
            .unwrap()
            .with_catalog("cat", "db");
        assert_eq!(
            ScanNode::new(&schema, None).to_string(),
            "TableSourceScan(table=[[cat, db, t]], fields=[a, b])"
        );
    }
}
