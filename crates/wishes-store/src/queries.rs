use crate::DocumentStore;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::{Map, Value};
use uuid::Uuid;

impl DocumentStore {
    /// Insert one document into a collection and return its generated id.
    /// The body is stored as given; the id lives in its own column and is
    /// injected back into the document as `_id` on retrieval.
    pub fn insert(&self, collection: &str, document: &Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(document)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents (id, collection, body) VALUES (?1, ?2, ?3)",
                rusqlite::params![id, collection, body],
            )?;
            Ok(())
        })?;

        Ok(id)
    }

    /// Fetch up to `limit` documents from a collection whose top-level
    /// fields equal every entry of `filter` (simple equality only).
    /// Results come back in insertion order; callers sort as needed.
    pub fn find(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
        limit: usize,
    ) -> Result<Vec<Value>> {
        self.with_conn(|conn| query_documents(conn, collection, filter, limit))
    }
}

fn query_documents(
    conn: &Connection,
    collection: &str,
    filter: &Map<String, Value>,
    limit: usize,
) -> Result<Vec<Value>> {
    let mut stmt =
        conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 ORDER BY rowid")?;

    let rows = stmt
        .query_map([collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut docs = Vec::new();
    for (id, body) in rows {
        if docs.len() >= limit {
            break;
        }
        let mut doc: Value = serde_json::from_str(&body)?;
        if !matches_filter(&doc, filter) {
            continue;
        }
        if let Some(obj) = doc.as_object_mut() {
            obj.insert("_id".into(), Value::String(id));
        }
        docs.push(doc);
    }

    Ok(docs)
}

fn matches_filter(doc: &Value, filter: &Map<String, Value>) -> bool {
    filter
        .iter()
        .all(|(key, expected)| doc.get(key) == Some(expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filter(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn insert_assigns_id_and_find_injects_it() {
        let store = DocumentStore::open_in_memory().unwrap();
        let id = store
            .insert("wish", &json!({"name": "Ann", "is_public": true}))
            .unwrap();
        assert!(!id.is_empty());

        let docs = store.find("wish", &Map::new(), 10).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["_id"], Value::String(id));
        assert_eq!(docs[0]["name"], "Ann");
    }

    #[test]
    fn find_applies_equality_filter_and_limit() {
        let store = DocumentStore::open_in_memory().unwrap();
        for i in 0..3 {
            store
                .insert("wish", &json!({"n": i, "is_public": true}))
                .unwrap();
        }
        store.insert("wish", &json!({"is_public": false})).unwrap();

        let public = filter(json!({"is_public": true}));
        let docs = store.find("wish", &public, 2).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d["is_public"] == json!(true)));

        let all = store.find("wish", &Map::new(), 100).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn collections_are_isolated() {
        let store = DocumentStore::open_in_memory().unwrap();
        store.insert("wish", &json!({"name": "Ann"})).unwrap();
        store.insert("other", &json!({"name": "Bob"})).unwrap();

        let docs = store.find("wish", &Map::new(), 10).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "Ann");
    }
}
