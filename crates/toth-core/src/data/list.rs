use super::DataElement;
use crate::error::Result;
use crate::reader::DataReader;
use crate::writer::DataWriter;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataList {
    elements: Vec<DataElement>,
}

impl DataList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: impl Into<DataElement>) {
        self.elements.push(element.into());
    }

    pub fn get(&self, index: usize) -> Option<&DataElement> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DataElement> {
        self.elements.get_mut(index)
    }

    /// Removes the element at `index`, shifting later elements down.
    pub fn remove(&mut self, index: usize) -> Option<DataElement> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataElement> {
        self.elements.iter()
    }

    pub fn read<R: DataReader + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut list = Self::new();
        reader.enter_list()?;
        while reader.has_next()? {
            list.elements.push(DataElement::read(reader)?);
        }
        reader.leave_list()?;
        Ok(list)
    }

    pub fn write<W: DataWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.open_list()?;
        for element in &self.elements {
            element.write(writer)?;
        }
        writer.close_list()?;
        Ok(())
    }
}

impl From<Vec<DataElement>> for DataList {
    fn from(elements: Vec<DataElement>) -> Self {
        Self { elements }
    }
}

impl FromIterator<DataElement> for DataList {
    fn from_iter<I: IntoIterator<Item = DataElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DataList {
    type Item = DataElement;
    type IntoIter = std::vec::IntoIter<DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a DataList {
    type Item = &'a DataElement;
    type IntoIter = std::slice::Iter<'a, DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_get_remove() {
        let mut list = DataList::new();
        assert!(list.is_empty());

        list.push("a");
        list.push(2);
        list.push(true);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Some(&DataElement::from("a")));

        assert_eq!(list.remove(1), Some(DataElement::from(2)));
        assert_eq!(list.get(1), Some(&DataElement::from(true)));
        assert_eq!(list.remove(5), None);
    }

    #[test]
    fn test_get_mut_replaces_in_place() {
        let mut list: DataList = vec![DataElement::Null].into();
        if let Some(slot) = list.get_mut(0) {
            *slot = DataElement::from("filled");
        }
        assert_eq!(list.get(0).and_then(DataElement::as_str), Some("filled"));
    }

    #[test]
    fn test_collect_and_iterate() {
        let list: DataList = (1..=3).map(DataElement::from).collect();
        let sum: i64 = list
            .iter()
            .filter_map(|e| e.as_number().and_then(|n| n.as_i64().ok()))
            .sum();
        assert_eq!(sum, 6);
    }
}
