use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A row of the `cocktails` table, column name to value.
///
/// The table shape is owned by the store, so rows are carried as opaque JSON
/// objects and serialized back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cocktail(pub Map<String, Value>);

impl Cocktail {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }
}

impl From<Map<String, Value>> for Cocktail {
    fn from(columns: Map<String, Value>) -> Self {
        Self(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_plain_object() {
        let mut columns = Map::new();
        columns.insert("name".into(), json!("Negroni"));
        columns.insert("abv".into(), json!(24));
        let cocktail = Cocktail::from(columns);

        let out = serde_json::to_value(&cocktail).unwrap();
        assert_eq!(out, json!({ "name": "Negroni", "abv": 24 }));
        assert_eq!(cocktail.get("name"), Some(&json!("Negroni")));
    }
}
