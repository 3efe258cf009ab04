//! Wire types for the parser server.
//!
//! # Design
//! These mirror the mock server's schema but are defined independently;
//! integration tests catch drift between the two crates. The client passes
//! decoded results through untouched, so the helpers here only read.

use serde::{Deserialize, Serialize};

/// Governor index of a token with no syntactic head.
pub const NO_HEAD: i64 = -1;
/// Governor gloss paired with `NO_HEAD`.
pub const DETACHED_GLOSS: &str = "$$NAN$$";
pub const ROOT_LABEL: &str = "ROOT";
pub const MWE_LABEL: &str = "MWE";

/// Which rendering the server should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Table,
    Tree,
}

/// Request body sent to the parser server.
#[derive(Debug, Serialize)]
pub struct ParseRequest<'a, T: ?Sized + Serialize> {
    pub texts: &'a T,
    pub output_type: OutputType,
}

/// One token of a parsed sentence. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub index: i64,
    pub word: String,
    pub original_text: String,
    pub pos: String,
}

/// One dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub dep: String,
    pub governor: i64,
    pub governor_gloss: String,
    pub dependent: i64,
    pub dependent_gloss: String,
}

impl Dependency {
    pub fn is_root(&self) -> bool {
        self.dep == ROOT_LABEL
    }

    pub fn is_detached(&self) -> bool {
        self.governor == NO_HEAD
    }

    pub fn is_mwe(&self) -> bool {
        self.dep == MWE_LABEL
    }
}

/// Tree-mode result for one input text.
///
/// `index` is the position in the response sequence; blank inputs still
/// occupy a slot and come back with no tokens and no edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSentence {
    pub index: usize,
    pub tokens: Vec<Token>,
    pub basic_dependencies: Vec<Dependency>,
}

impl ParsedSentence {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.basic_dependencies.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Dependency> {
        self.basic_dependencies.iter().filter(|d| d.is_root())
    }
}

/// Typed view of one row of a table-mode result.
///
/// Rows are `index, word, _, pos, pos, _, head, relation`, tab separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub index: i64,
    pub word: String,
    pub pos: String,
    pub head: i64,
    pub relation: String,
}

impl TableRow {
    /// Parse a single row. Returns `None` if the row does not have eight
    /// columns or its numeric columns are not integers.
    pub fn parse(line: &str) -> Option<Self> {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != 8 {
            return None;
        }
        Some(Self {
            index: cols[0].parse().ok()?,
            word: cols[1].to_string(),
            pos: cols[3].to_string(),
            head: cols[6].parse().ok()?,
            relation: cols[7].to_string(),
        })
    }

    /// Parse every row of a table. An empty table has no rows.
    pub fn parse_table(table: &str) -> Option<Vec<Self>> {
        table.lines().filter(|l| !l.is_empty()).map(Self::parse).collect()
    }

    pub fn is_detached(&self) -> bool {
        self.head == NO_HEAD
    }

    pub fn is_mwe(&self) -> bool {
        self.relation == MWE_LABEL
    }
}
