use crate::types::{Document, Value};
use std::collections::HashMap;

static NULL: Value = Value::Null;

/// The working table of a pipeline run.
///
/// Columns keep the order in which they were first seen across the source
/// documents. Every row holds one value per column; a field missing from a
/// document is [`Value::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>
}

impl Frame {
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut columns = Vec::<String>::new();
        let mut positions = HashMap::<String, usize>::new();
        let mut sparse_rows = Vec::with_capacity(documents.len());

        for document in documents {
            let mut sparse_row = Vec::with_capacity(document.len());

            for (key, value) in document {
                let position = match positions.get(&key) {
                    Some(position) => *position,
                    None => {
                        columns.push(key.clone());
                        positions.insert(key, columns.len() - 1);
                        columns.len() - 1
                    }
                };

                sparse_row.push((position, value));
            }

            sparse_rows.push(sparse_row);
        }

        let width = columns.len();
        let rows = sparse_rows.into_iter()
            .map(|sparse_row| {
                let mut row = vec![Value::Null; width];

                for (position, value) in sparse_row {
                    row[position] = value;
                }

                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Vec<Value>> {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn value(&self, row: usize, column: usize) -> &Value {
        self.rows.get(row)
            .and_then(|values| values.get(column))
            .unwrap_or(&NULL)
    }

    /// Writes `values` into the column called `name`, appending the column when it does not exist yet.
    /// Rows beyond the end of `values` receive [`Value::Null`].
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> usize {
        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());

                for row in self.rows.iter_mut() {
                    row.push(Value::Null);
                }

                self.columns.len() - 1
            }
        };

        let mut values = values.into_iter();

        for row in self.rows.iter_mut() {
            row[index] = values.next().unwrap_or_default();
        }

        index
    }
}
