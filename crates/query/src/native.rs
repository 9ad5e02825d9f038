// crates/query/src/native.rs

use serde_json::{json, Map, Value as Json};

use crate::ast::{FilterExpression, Predicate};

impl Predicate {
    /// Document-store filter for this predicate alone.
    ///
    /// - `field:v`   → `{ field: v }`
    /// - `field!:v`  → `{ field: { "$ne": v } }`
    /// - `field>v` … → `{ field: { "$gt" | "$gte" | "$lt" | "$lte": v } }`
    pub fn to_native(&self) -> Json {
        let value = self.value.to_json();
        let condition = match self.operator.native() {
            None => value,
            Some(op) => single_entry(op.to_string(), value),
        };
        single_entry(self.field.clone(), condition)
    }
}

fn single_entry(key: String, value: Json) -> Json {
    let mut map = Map::with_capacity(1);
    map.insert(key, value);
    Json::Object(map)
}

impl FilterExpression {
    /// Document-store filter for the whole conjunction.
    ///
    /// A single predicate renders without a wrapper; several render as `$and`
    /// in input order, so repeated fields never overwrite one another.
    pub fn to_native(&self) -> Json {
        match self.predicates() {
            [only] => only.to_native(),
            many => {
                let clauses: Vec<Json> = many.iter().map(Predicate::to_native).collect();
                json!({ "$and": clauses })
            }
        }
    }
}
