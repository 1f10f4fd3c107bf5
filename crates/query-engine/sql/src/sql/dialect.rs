//! Dialect differences: identifier quoting, placeholders, paging and reserved words.
//!
//! Identifiers only ever come from static mapping metadata. Quoting still doubles
//! the closing quote character so a name can never end the quoted identifier early.

use std::fmt;

use super::ast::Limit;

/// Formatting rules of one database engine.
pub trait SyntaxProvider: fmt::Debug + Send + Sync {
    /// A short name of the engine, used in logs.
    fn name(&self) -> &'static str;

    /// Quote a table, schema, column or alias name.
    fn quote_identifier(&self, name: &str) -> String;

    /// The placeholder for the parameter at `index`, counting from 0.
    fn parameter_marker(&self, index: usize) -> String;

    /// The fragment appended after the ORDER BY clause to select a window of
    /// rows. `ordered` tells whether the statement has an ORDER BY clause.
    fn paging_clause(&self, limit: &Limit, ordered: bool) -> String;

    /// Reserved words of the engine, uppercase.
    fn reserved_words(&self) -> &'static [&'static str];

    fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words()
            .iter()
            .any(|word| word.eq_ignore_ascii_case(name))
    }

    /// Quote a name only when it is a reserved word.
    fn escape_reserved(&self, name: &str) -> String {
        if self.is_reserved(name) {
            self.quote_identifier(name)
        } else {
            name.to_string()
        }
    }
}

fn quote_with(name: &str, open: char, close: char) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push(open);
    for c in name.chars() {
        if c == close {
            quoted.push(close);
        }
        quoted.push(c);
    }
    quoted.push(close);
    quoted
}

fn limit_offset(limit: &Limit) -> String {
    format!(" LIMIT {} OFFSET {}", limit.limit, limit.offset)
}

const ANSI_RESERVED: &[&str] = &[
    "ALL", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN", "CONSTRAINT",
    "CREATE", "CROSS", "CURRENT", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END",
    "EXISTS", "FALSE", "FOR", "FOREIGN", "FROM", "FULL", "GRANT", "GROUP", "HAVING", "IN",
    "INNER", "INSERT", "INTO", "IS", "JOIN", "LEFT", "LIKE", "NOT", "NULL", "ON", "OR", "ORDER",
    "OUTER", "PRIMARY", "REFERENCES", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO", "TRUE",
    "UNION", "UNIQUE", "UPDATE", "USER", "USING", "VALUES", "WHEN", "WHERE", "WITH",
];

/// PostgreSQL: `"name"`, `$1`, `LIMIT n OFFSET m`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostgreSql;

impl SyntaxProvider for PostgreSql {
    fn name(&self) -> &'static str {
        "postgresql"
    }
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '"', '"')
    }
    fn parameter_marker(&self, index: usize) -> String {
        format!("${}", index + 1)
    }
    fn paging_clause(&self, limit: &Limit, _ordered: bool) -> String {
        limit_offset(limit)
    }
    fn reserved_words(&self) -> &'static [&'static str] {
        POSTGRESQL_RESERVED
    }
}

const POSTGRESQL_RESERVED: &[&str] = &[
    "ALL", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC", "ASYMMETRIC", "BOTH", "CASE",
    "CAST", "CHECK", "COLLATE", "COLUMN", "CONSTRAINT", "CREATE", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_USER", "DEFAULT", "DEFERRABLE", "DESC", "DISTINCT", "DO", "ELSE", "END", "EXCEPT",
    "FALSE", "FETCH", "FOR", "FOREIGN", "FROM", "GRANT", "GROUP", "HAVING", "IN", "INITIALLY",
    "INTERSECT", "INTO", "LATERAL", "LEADING", "LIMIT", "LOCALTIME", "NOT", "NULL", "OFFSET",
    "ON", "ONLY", "OR", "ORDER", "PLACING", "PRIMARY", "REFERENCES", "RETURNING", "SELECT",
    "SESSION_USER", "SOME", "SYMMETRIC", "TABLE", "THEN", "TO", "TRAILING", "TRUE", "UNION",
    "UNIQUE", "USER", "USING", "VARIADIC", "WHEN", "WHERE", "WINDOW", "WITH",
];

/// SQL Server: `[name]`, `@p0`, `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
///
/// OFFSET/FETCH is only valid after an ORDER BY, so an unordered statement
/// gets `ORDER BY (SELECT NULL)`, which keeps the row order unspecified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqlServer;

impl SyntaxProvider for SqlServer {
    fn name(&self) -> &'static str {
        "sqlserver"
    }
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '[', ']')
    }
    fn parameter_marker(&self, index: usize) -> String {
        format!("@p{index}")
    }
    fn paging_clause(&self, limit: &Limit, ordered: bool) -> String {
        let order_by = if ordered { "" } else { " ORDER BY (SELECT NULL)" };
        format!(
            "{order_by} OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
            limit.offset, limit.limit
        )
    }
    fn reserved_words(&self) -> &'static [&'static str] {
        SQLSERVER_RESERVED
    }
}

const SQLSERVER_RESERVED: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BACKUP", "BEGIN", "BETWEEN", "BREAK",
    "BROWSE", "BULK", "BY", "CASCADE", "CASE", "CHECK", "CLOSE", "CLUSTERED", "COLUMN", "COMMIT",
    "CONSTRAINT", "CONTAINS", "CONTINUE", "CREATE", "CROSS", "CURRENT", "CURSOR", "DATABASE",
    "DEFAULT", "DELETE", "DENY", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXEC", "EXISTS",
    "FETCH", "FILE", "FOR", "FOREIGN", "FROM", "FULL", "FUNCTION", "GRANT", "GROUP", "HAVING",
    "IDENTITY", "IF", "IN", "INDEX", "INNER", "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT",
    "LIKE", "NOT", "NULL", "OF", "OFF", "OFFSETS", "ON", "OPEN", "OR", "ORDER", "OUTER", "PERCENT",
    "PLAN", "PRIMARY", "PROCEDURE", "PUBLIC", "READ", "REFERENCES", "RIGHT", "RULE", "SCHEMA",
    "SELECT", "SET", "TABLE", "THEN", "TO", "TOP", "TRAN", "TRANSACTION", "UNION", "UNIQUE",
    "UPDATE", "USE", "USER", "VALUES", "VIEW", "WHEN", "WHERE", "WHILE", "WITH",
];

/// MySQL: `` `name` ``, `?`, `LIMIT m, n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySql;

impl SyntaxProvider for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '`', '`')
    }
    fn parameter_marker(&self, _index: usize) -> String {
        "?".to_string()
    }
    fn paging_clause(&self, limit: &Limit, _ordered: bool) -> String {
        format!(" LIMIT {}, {}", limit.offset, limit.limit)
    }
    fn reserved_words(&self) -> &'static [&'static str] {
        MYSQL_RESERVED
    }
}

const MYSQL_RESERVED: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN",
    "CONDITION", "CONSTRAINT", "CREATE", "CROSS", "DATABASE", "DEFAULT", "DELETE", "DESC",
    "DESCRIBE", "DISTINCT", "DIV", "DROP", "ELSE", "EXISTS", "FALSE", "FOR", "FOREIGN", "FROM",
    "GRANT", "GROUP", "HAVING", "IF", "IN", "INDEX", "INNER", "INSERT", "INTERVAL", "INTO", "IS",
    "JOIN", "KEY", "KEYS", "LEFT", "LIKE", "LIMIT", "MATCH", "NOT", "NULL", "ON", "OR", "ORDER",
    "OUTER", "PRIMARY", "RANGE", "READ", "REFERENCES", "REGEXP", "RIGHT", "SCHEMA", "SELECT",
    "SET", "SHOW", "TABLE", "THEN", "TO", "TRUE", "UNION", "UNIQUE", "UPDATE", "USE", "USING",
    "VALUES", "WHEN", "WHERE", "WITH", "WRITE",
];

/// SQLite: `"name"`, `?`, `LIMIT n OFFSET m`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqlite;

impl SyntaxProvider for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '"', '"')
    }
    fn parameter_marker(&self, _index: usize) -> String {
        "?".to_string()
    }
    fn paging_clause(&self, limit: &Limit, _ordered: bool) -> String {
        limit_offset(limit)
    }
    fn reserved_words(&self) -> &'static [&'static str] {
        ANSI_RESERVED
    }
}
