use crate::value::Value;

/// SQL text with positional bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterizedStatement {
    sql: String,
    params: Vec<Value>,
}

impl ParameterizedStatement {
    /// Create a new statement with no parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Replace the parameters, in bind order
    pub fn with_params<I, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Append one positional parameter
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl From<&str> for ParameterizedStatement {
    fn from(sql: &str) -> Self {
        Self::new(sql)
    }
}

impl From<String> for ParameterizedStatement {
    fn from(sql: String) -> Self {
        Self::new(sql)
    }
}

/// Ordered statements; execution follows insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatementBatch {
    statements: Vec<ParameterizedStatement>,
}

impl StatementBatch {
    /// Create a new empty batch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: ParameterizedStatement) {
        self.statements.push(statement);
    }

    /// Append `statement` and return the batch
    pub fn with(mut self, statement: ParameterizedStatement) -> Self {
        self.push(statement);
        self
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterizedStatement> {
        self.statements.iter()
    }
}

impl From<Vec<ParameterizedStatement>> for StatementBatch {
    fn from(statements: Vec<ParameterizedStatement>) -> Self {
        Self { statements }
    }
}

impl From<ParameterizedStatement> for StatementBatch {
    fn from(statement: ParameterizedStatement) -> Self {
        Self {
            statements: vec![statement],
        }
    }
}

impl FromIterator<ParameterizedStatement> for StatementBatch {
    fn from_iter<I: IntoIterator<Item = ParameterizedStatement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StatementBatch {
    type Item = ParameterizedStatement;
    type IntoIter = std::vec::IntoIter<ParameterizedStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatementBatch {
    type Item = &'a ParameterizedStatement;
    type IntoIter = std::slice::Iter<'a, ParameterizedStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
