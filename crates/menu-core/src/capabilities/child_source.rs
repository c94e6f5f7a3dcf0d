//! Child source trait (port) for data-driven child generation

use menu_shared::OptionMap;
use serde_json::Value;

use crate::error::MenuError;

/// Produces one record per generated child. Records are field maps; the
/// `children_source` option block decides which fields become the title and
/// route parameters. A failing fetch aborts the whole menu build.
pub trait ChildSource: Send + Sync {
    fn fetch(&self, query: &OptionMap) -> Result<Vec<OptionMap>, MenuError>;
}

/// In-memory records filtered by equality on every query field.
#[derive(Debug, Clone, Default)]
pub struct StaticChildSource {
    records: Vec<OptionMap>,
}

impl StaticChildSource {
    pub fn new(records: Vec<OptionMap>) -> Self {
        Self { records }
    }

    pub fn from_values(values: Vec<Value>) -> Result<Self, MenuError> {
        let records = values
            .into_iter()
            .map(|value| match value {
                Value::Object(record) => Ok(record),
                other => Err(MenuError::ChildSource(format!(
                    "static record must be a map, got {}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }
}

impl ChildSource for StaticChildSource {
    fn fetch(&self, query: &OptionMap) -> Result<Vec<OptionMap>, MenuError> {
        Ok(self
            .records
            .iter()
            .filter(|record| {
                query
                    .iter()
                    .all(|(field, expected)| record.get(field) == Some(expected))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_static_source_filters_by_query() {
        let source = StaticChildSource::from_values(vec![
            json!({"id": 1, "name": "Apples", "published": true}),
            json!({"id": 2, "name": "Pears", "published": false}),
        ])
        .unwrap();

        let mut query = OptionMap::new();
        query.insert("published".to_string(), json!(true));

        let records = source.fetch(&query).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], json!("Apples"));
        assert_eq!(source.fetch(&OptionMap::new()).unwrap().len(), 2);
    }

    #[test]
    fn test_static_source_rejects_scalar_records() {
        let result = StaticChildSource::from_values(vec![json!("oops")]);
        assert!(matches!(result, Err(MenuError::ChildSource(_))));
    }
}
