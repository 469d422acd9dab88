/// How an [`IdentifierPreparer`] treats identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStrategy {
    /// Emit identifiers verbatim. Used for DML, where the store resolves
    /// names case-insensitively and quoting only gets in the way.
    Never,
    /// Wrap every identifier in `quote`, doubling embedded quote characters.
    Always { quote: char },
}

/// Formats identifiers for generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierPreparer {
    strategy: QuoteStrategy,
}

impl IdentifierPreparer {
    /// Preparer for SELECT and other DML statements.
    pub fn dml() -> Self {
        Self {
            strategy: QuoteStrategy::Never,
        }
    }

    /// Preparer for DDL statements (backtick-quoted).
    pub fn ddl() -> Self {
        Self {
            strategy: QuoteStrategy::Always { quote: '`' },
        }
    }

    pub fn strategy(&self) -> QuoteStrategy {
        self.strategy
    }

    pub fn quote(&self, ident: &str) -> String {
        match self.strategy {
            QuoteStrategy::Never => ident.to_string(),
            QuoteStrategy::Always { quote } => {
                let doubled: String = [quote, quote].iter().collect();
                let escaped = ident.replace(quote, &doubled);
                format!("{quote}{escaped}{quote}")
            }
        }
    }

    /// `schema.table`, each part formatted with [`quote`](Self::quote).
    pub fn format_table(&self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(s) => format!("{}.{}", self.quote(s), self.quote(table)),
            None => self.quote(table),
        }
    }
}
