use crate::models::Field;
use std::collections::HashMap;

/// Where each canonical [`Field`] lives in a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    indexes: HashMap<Field, usize>
}

impl ColumnMap {
    /// Matches column names against field aliases, case-insensitively. The first alias present wins.
    pub fn resolve(columns: &[String]) -> Self {
        let lowered: Vec<String> = columns.iter().map(|column| column.trim().to_lowercase()).collect();
        let mut indexes = HashMap::new();

        for field in Field::ALL {
            let found = field.aliases().iter()
                .find_map(|alias| lowered.iter().position(|column| column == alias));

            if let Some(index) = found {
                indexes.insert(field, index);
            }
        }

        Self { indexes }
    }

    pub fn get(&self, field: Field) -> Option<usize> {
        self.indexes.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.indexes.contains_key(&field)
    }

    /// Coordinates come either from one combined column or from a longitude/latitude pair.
    pub fn has_coordinates(&self) -> bool {
        self.contains(Field::Coordinates) || (self.contains(Field::Longitude) && self.contains(Field::Latitude))
    }
}
