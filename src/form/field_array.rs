use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single edit against a [`FieldArray`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayEdit<T> {
    /// Replace the entry at an index; length unchanged.
    Set(usize, T),
    /// Grow by one at the end.
    Append(T),
    /// Remove an entry; refused when only one remains.
    RemoveAt(usize),
}

/// Ordered, variable-length list embedded in a draft (headlines, core
/// courses, bullet points). Always holds at least one entry. Display order
/// equals index; there is no move operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldArray<T>(Vec<T>);

impl<T: Default> FieldArray<T> {
    /// A one-entry array holding `T::default()`.
    pub fn new() -> Self {
        FieldArray(vec![T::default()])
    }

    pub fn append_default(&mut self) {
        self.0.push(T::default());
    }
}

impl<T: Default> Default for FieldArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> From<Vec<T>> for FieldArray<T> {
    fn from(mut items: Vec<T>) -> Self {
        if items.is_empty() {
            items.push(T::default());
        }
        FieldArray(items)
    }
}

impl<T> FieldArray<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    /// In-place replace. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn append(&mut self, value: T) {
        self.0.push(value);
    }

    /// Remove and shift the tail left. No-op when `len() <= 1` or the index
    /// is out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if self.0.len() <= 1 || index >= self.0.len() {
            return false;
        }
        self.0.remove(index);
        true
    }

    /// Returns whether the array changed.
    pub fn apply(&mut self, edit: ArrayEdit<T>) -> bool {
        match edit {
            ArrayEdit::Set(i, value) => self.set(i, value),
            ArrayEdit::Append(value) => {
                self.append(value);
                true
            }
            ArrayEdit::RemoveAt(i) => self.remove_at(i),
        }
    }
}

impl FieldArray<String> {
    /// Build from string slices.
    pub fn of<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        FieldArray::from(items.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    pub fn has_non_blank(&self) -> bool {
        self.0.iter().any(|s| !s.trim().is_empty())
    }
}

/// An entry the user left empty. Such rows exist only so the form always
/// shows one input; they never go over the wire.
pub trait BlankEntry {
    fn is_blank(&self) -> bool;
}

impl BlankEntry for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T: BlankEntry + Clone> FieldArray<T> {
    /// The entries worth sending, in order. May be empty.
    pub fn filled(&self) -> Vec<T> {
        self.0.iter().filter(|v| !v.is_blank()).cloned().collect()
    }
}

/// `serialize_with` helper for draft fields: blank rows are dropped.
pub fn serialize_filled<T, S>(array: &FieldArray<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: BlankEntry + Clone + Serialize,
    S: Serializer,
{
    array.filled().serialize(serializer)
}

impl<'a, T> IntoIterator for &'a FieldArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for FieldArray<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for FieldArray<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(FieldArray::from)
    }
}
