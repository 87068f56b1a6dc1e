use std::collections::HashMap;

/// Entries keyed by a name together with an argument count, so that the same name may be bound
/// once per arity.
#[derive(Debug, Clone)]
pub(crate) struct ArityTable<T> {
    entries: HashMap<String, HashMap<usize, T>>,
}

impl<T> ArityTable<T> {
    pub fn new() -> Self {
        ArityTable {
            entries: HashMap::new(),
        }
    }

    /// Inserts `value`, returning the entry it replaced
    pub fn insert(&mut self, name: String, arity: usize, value: T) -> Option<T> {
        self.entries.entry(name).or_default().insert(arity, value)
    }

    pub fn get(&self, name: &str, arity: usize) -> Option<&T> {
        self.entries.get(name)?.get(&arity)
    }

    pub fn contains(&self, name: &str, arity: usize) -> bool {
        self.get(name, arity).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|by_arity| by_arity.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, &T)> {
        self.entries.iter().flat_map(|(name, by_arity)| {
            by_arity
                .iter()
                .map(move |(arity, value)| (name.as_str(), *arity, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_per_arity() {
        let mut table = ArityTable::new();
        assert_eq!(table.insert("equal".to_owned(), 2, 'a'), None);
        assert_eq!(table.insert("equal".to_owned(), 3, 'b'), None);
        assert_eq!(table.insert("equal".to_owned(), 2, 'c'), Some('a'));
        assert_eq!(table.get("equal", 2), Some(&'c'));
        assert_eq!(table.get("equal", 3), Some(&'b'));
        assert!(!table.contains("equal", 1));
        assert_eq!(table.len(), 2);
    }
}
