//! Compact target specifications.
//!
//! Operators select work with tokens like `mpml_sc`: a module identifier, an
//! underscore, then a string of single-character codes. For builds the codes
//! are tokenized into a [`SpecCodes`] set; for tests the part after the
//! underscore is a test name instead.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Code for the clobber modifier.
pub const CLOBBER_CODE: char = 'c';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
  #[error("unknown spec code '{code}' in \"{codes}\"")]
  UnknownCode { code: char, codes: String },
}

/// A named category of source code inside a module.
///
/// Declaration order is the order in which build commands are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subset {
  Primary,
  Test,
  Web,
  Selenium,
  Upgrade,
  Hybrid,
}

impl Subset {
  pub const ALL: [Subset; 6] = [
    Subset::Primary,
    Subset::Test,
    Subset::Web,
    Subset::Selenium,
    Subset::Upgrade,
    Subset::Hybrid,
  ];

  pub fn code(self) -> char {
    match self {
      Subset::Primary => 's',
      Subset::Test => 't',
      Subset::Web => 'w',
      Subset::Selenium => 'e',
      Subset::Upgrade => 'g',
      Subset::Hybrid => 'h',
    }
  }

  pub fn from_code(code: char) -> Option<Self> {
    Self::ALL.into_iter().find(|subset| subset.code() == code)
  }

  /// Directory name of the subset inside a module.
  pub fn dir_name(self) -> &'static str {
    match self {
      Subset::Primary => "src",
      Subset::Test => "src_test",
      Subset::Web => "src_web",
      Subset::Selenium => "src_selenium",
      Subset::Upgrade => "src_upgrade",
      Subset::Hybrid => "src_hybrid",
    }
  }

  /// Whether a clobber may precede a build of this subset.
  pub fn is_clobber_capable(self) -> bool {
    match self {
      Subset::Primary | Subset::Test | Subset::Selenium | Subset::Upgrade => true,
      Subset::Web | Subset::Hybrid => false,
    }
  }
}

impl fmt::Display for Subset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.dir_name())
  }
}

/// Parsed build codes: the requested subsets plus the clobber modifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecCodes {
  subsets: BTreeSet<Subset>,
  clobber: bool,
}

impl SpecCodes {
  /// Tokenize a code string. Codes may repeat and appear in any order.
  pub fn parse(codes: &str) -> Result<Self, SpecError> {
    let mut parsed = Self::default();
    for code in codes.chars() {
      if code == CLOBBER_CODE {
        parsed.clobber = true;
        continue;
      }
      let subset = Subset::from_code(code).ok_or_else(|| SpecError::UnknownCode {
        code,
        codes: codes.to_string(),
      })?;
      parsed.subsets.insert(subset);
    }
    Ok(parsed)
  }

  pub fn contains(&self, subset: Subset) -> bool {
    self.subsets.contains(&subset)
  }

  pub fn clobber(&self) -> bool {
    self.clobber
  }

  /// Requested subsets in emission order.
  pub fn subsets(&self) -> impl Iterator<Item = Subset> + '_ {
    self.subsets.iter().copied()
  }

  pub fn is_empty(&self) -> bool {
    self.subsets.is_empty()
  }

  /// The clobber modifier was given but no requested subset can be clobbered.
  pub fn clobber_is_inert(&self) -> bool {
    self.clobber && !self.subsets().any(Subset::is_clobber_capable)
  }
}

/// An operator token split into module identifier and qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec<'a> {
  pub module_id: &'a str,
  /// Codes for builds, a test name for tests; empty when absent.
  pub qualifier: &'a str,
}

impl<'a> TargetSpec<'a> {
  /// Split on the first `_`.
  pub fn split(token: &'a str) -> Self {
    match token.split_once('_') {
      Some((module_id, qualifier)) => Self { module_id, qualifier },
      None => Self {
        module_id: token,
        qualifier: "",
      },
    }
  }
}
