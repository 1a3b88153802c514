//! Build-order file parsing.
//!
//! Each line of the order file may name a module as `group/module`, optionally
//! prefixed by `#` (and one space). Matching lines get sequential ranks in file
//! order; commented-out lines still consume a rank.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::CatalogError;

static ORDER_LINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^#? ?(\w+)/(\w+)$").expect("order line pattern is valid"));

/// Declared build rank per module name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOrder {
  ranks: HashMap<String, usize>,
}

impl BuildOrder {
  pub fn parse(content: &str) -> Self {
    let ranks = content
      .lines()
      .map(|line| line.trim_end_matches('\r'))
      .filter_map(|line| ORDER_LINE.captures(line))
      .enumerate()
      .map(|(rank, caps)| (caps[2].to_string(), rank))
      .collect();
    Self { ranks }
  }

  pub fn read(path: &Path) -> Result<Self, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::OrderFileUnavailable {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(Self::parse(&content))
  }

  /// Rank of `module`; modules the file does not list rank 0.
  pub fn rank_of(&self, module: &str) -> usize {
    self.ranks.get(module).copied().unwrap_or(0)
  }

  pub fn len(&self) -> usize {
    self.ranks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ranks.is_empty()
  }
}
