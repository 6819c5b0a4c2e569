use super::DataElement;
use crate::error::Result;
use crate::reader::DataReader;
use crate::writer::DataWriter;

/// String-keyed map that keeps entries in insertion order.
///
/// Re-inserting an existing key replaces its value without moving the entry.
/// Lookups are linear; maps in the data tree are small records, not indexes.
#[derive(Debug, Clone, Default)]
pub struct DataMap {
    entries: Vec<(String, DataElement)>,
}

impl DataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `element` under `key`, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        element: impl Into<DataElement>,
    ) -> Option<DataElement> {
        let key = key.into();
        let element = element.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, element)),
            None => {
                self.entries.push((key, element));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&DataElement> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut DataElement> {
        self.position(key).map(|index| &mut self.entries[index].1)
    }

    pub fn remove(&mut self, key: &str) -> Option<DataElement> {
        self.position(key)
            .map(|index| self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataElement)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Reads a map; duplicate keys keep the last value at the first key's position.
    pub fn read<R: DataReader + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut map = Self::new();
        reader.enter_map()?;
        while reader.has_next()? {
            let key = reader.read_key()?;
            let value = DataElement::read(reader)?;
            map.insert(key, value);
        }
        reader.leave_map()?;
        Ok(map)
    }

    pub fn write<W: DataWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.open_map()?;
        for (key, value) in &self.entries {
            writer.key(key)?;
            value.write(writer)?;
        }
        writer.close_map()?;
        Ok(())
    }
}

/// Equality ignores entry order.
impl PartialEq for DataMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Into<String>, V: Into<DataElement>> FromIterator<(K, V)> for DataMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for DataMap {
    type Item = (String, DataElement);
    type IntoIter = std::vec::IntoIter<(String, DataElement)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = DataMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        map.insert("mid", 3);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = DataMap::new();
        map.insert("a", 1);
        map.insert("b", 2);

        let previous = map.insert("a", "one");
        assert_eq!(previous, Some(DataElement::from(1)));
        assert_eq!(map.len(), 2);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&DataElement::from("one")));
    }

    #[test]
    fn test_remove_and_contains() {
        let mut map: DataMap = [("x", 1), ("y", 2)].into_iter().collect();
        assert!(map.contains_key("x"));
        assert_eq!(map.remove("x"), Some(DataElement::from(1)));
        assert!(!map.contains_key("x"));
        assert_eq!(map.remove("x"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let map = DataMap::new();
        assert!(map.get("nope").is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: DataMap = [("x", 1), ("y", 2)].into_iter().collect();
        let b: DataMap = [("y", 2), ("x", 1)].into_iter().collect();
        let c: DataMap = [("x", 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
