//! Output ordering of releases

use crate::core::error::{LineageError, MapResult};
use crate::script::model::Map;
use std::cmp::Ordering;

/// One piece of a natural sort key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
  Text(String),
  Number(u128),
}

/// Sort key comparing digit runs by value and letters without case
///
/// `a_b_c_00010_0_0` sorts after `a_b_c_2`.
pub fn natural_key(s: &str) -> Vec<KeyPart> {
  let mut parts = Vec::new();
  let mut text = String::new();
  let mut digits = String::new();

  for c in s.chars() {
    if c.is_ascii_digit() {
      if digits.is_empty() {
        parts.push(KeyPart::Text(std::mem::take(&mut text)));
      }
      digits.push(c);
    } else {
      if !digits.is_empty() {
        parts.push(number(&digits));
        digits.clear();
      }
      text.extend(c.to_lowercase());
    }
  }
  if !digits.is_empty() {
    parts.push(number(&digits));
  }
  parts.push(KeyPart::Text(text));
  parts
}

fn number(digits: &str) -> KeyPart {
  KeyPart::Number(digits.parse().unwrap_or(u128::MAX))
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
  natural_key(a).cmp(&natural_key(b))
}

/// `top` and its ancestors, taken from the chain that reaches it
fn ancestry(chains: Vec<Vec<String>>, top: &str) -> Option<Vec<String>> {
  chains.into_iter().find_map(|mut chain| {
    let at = chain.iter().position(|name| name == top)?;
    Some(chain.split_off(at))
  })
}

impl Map {
  /// Put the ancestry of `top` first, everything else after
  ///
  /// Both groups are kept in ascending natural order. `top` need not head a
  /// chain; only its own ancestors are pulled to the front.
  pub fn sort_releases_nice(&mut self, top: &str) -> MapResult<()> {
    self.ensure_checked()?;

    let chains = self.dependencies()?;
    let Some(top_chain) = ancestry(chains, top) else {
      return Err(LineageError::UnknownRelease { name: top.to_string() }.into());
    };

    let releases = self.releases_mut();
    releases.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    let (mut ordered, rest): (Vec<_>, Vec<_>) = releases.drain(..).partition(|r| top_chain.contains(&r.name));
    ordered.extend(rest);
    *releases = ordered;
    Ok(())
  }
}
