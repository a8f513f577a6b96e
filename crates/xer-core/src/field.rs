use serde::{Deserialize, Serialize};

/// A decoded column value.
///
/// `Blank` means the column was present in the row but empty. `Absent`
/// means the table does not declare the column or the row ended before it.
/// Neither is ever collapsed into a zero or an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field<T> {
    Value(T),
    Blank,
    Absent,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            Field::Blank | Field::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(value) => Some(value),
            Field::Blank | Field::Absent => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Field::Value(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Field::Blank)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Value(value) => Field::Value(value),
            Field::Blank => Field::Blank,
            Field::Absent => Field::Absent,
        }
    }

    pub fn map<U, F>(self, f: F) -> Field<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Field::Value(value) => Field::Value(f(value)),
            Field::Blank => Field::Blank,
            Field::Absent => Field::Absent,
        }
    }
}

impl<T: Copy> Field<T> {
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl Field<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.value().map(String::as_str)
    }
}
