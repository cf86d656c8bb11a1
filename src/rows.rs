/// Rows produced by one successful statement, in engine order.
///
/// Rows are opaque to the core; nothing here looks inside them.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSequence<R> {
    rows: Vec<R>,
}

impl<R> RowSequence<R> {
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn first(&self) -> Option<&R> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn into_vec(self) -> Vec<R> {
        self.rows
    }
}

impl<R> Default for RowSequence<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<Vec<R>> for RowSequence<R> {
    fn from(rows: Vec<R>) -> Self {
        Self { rows }
    }
}

impl<R> FromIterator<R> for RowSequence<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<R> IntoIterator for RowSequence<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
