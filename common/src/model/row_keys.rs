//! Render keys for editable column rows.
//!
//! Columns carry no identity of their own, so a list view that reorders them
//! needs keys that follow each column through moves. `RowKeys` mirrors the
//! structural edits made to a column list and hands out a key per position.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowKeys {
    keys: Vec<u64>,
    next: u64,
}

impl RowKeys {
    /// Fresh keys for a list of `len` rows.
    pub fn with_len(len: usize) -> Self {
        let mut keys = Self::default();
        keys.reset(len);
        keys
    }

    /// Discards every key and issues `len` new ones.
    pub fn reset(&mut self, len: usize) {
        self.keys.clear();
        for _ in 0..len {
            self.push();
        }
    }

    pub fn push(&mut self) {
        self.keys.push(self.next);
        self.next += 1;
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.keys.len() {
            self.keys.remove(index);
        }
    }

    /// Moves the key at `from` to `to`, matching `ColumnList::reorder_column`.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from < self.keys.len() && to < self.keys.len() {
            let key = self.keys.remove(from);
            self.keys.insert(to, key);
        }
    }

    /// Key of the row at `index`. Positions past the tracked rows fall back
    /// to a key derived from the position so rendering never fails.
    pub fn key(&self, index: usize) -> String {
        match self.keys.get(index) {
            Some(key) => format!("row-{key}"),
            None => format!("pos-{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::{DataType, SchemaDraft};

    #[test]
    fn keys_follow_columns_through_a_reorder() {
        let mut draft = SchemaDraft::new();
        let mut keys = RowKeys::default();
        let columns = [
            ("a", DataType::String),
            ("b", DataType::Number),
            ("c", DataType::Date),
        ];
        for (title, data_type) in columns {
            draft.add_column(title, data_type);
            keys.push();
        }
        let key_of_c = keys.key(2);

        draft.reorder_column(2, 0).unwrap();
        keys.reorder(2, 0);

        assert_eq!(draft.columns[0].title, "c");
        assert_eq!(keys.key(0), key_of_c);
        assert_eq!(draft.columns[0].data_type(), DataType::Date);
    }

    #[test]
    fn keys_are_not_reused_after_remove_then_add() {
        let mut keys = RowKeys::with_len(2);
        let first = keys.key(0);
        let second = keys.key(1);

        keys.remove(0);
        keys.push();

        assert_eq!(keys.key(2), "pos-2");
        assert_eq!(keys.key(0), second);
        assert_ne!(keys.key(1), first);
        assert_ne!(keys.key(1), second);
    }

    #[test]
    fn reset_issues_fresh_keys() {
        let mut keys = RowKeys::with_len(1);
        let old = keys.key(0);
        keys.reset(3);
        assert_eq!(keys.key(3), "pos-3");
        assert!((0..3).all(|index| keys.key(index) != old));
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut keys = RowKeys::with_len(2);
        let before = keys.clone();
        keys.remove(5);
        keys.reorder(0, 9);
        assert_eq!(keys, before);
        assert_eq!(keys.key(7), "pos-7");
    }
}
