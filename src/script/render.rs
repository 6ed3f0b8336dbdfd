//! Serializer back to the version script grammar
//!
//! Scopes and their members are written in sorted order so the same model
//! always renders to the same text.

use crate::script::model::{Map, Release};
use std::fmt;

impl fmt::Display for Release {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name)?;
    if self.released {
      write!(f, "    # Released")?;
    }
    writeln!(f)?;
    writeln!(f, "{{")?;
    for (scope, members) in &self.symbols {
      writeln!(f, "    {}:", scope)?;
      let mut sorted: Vec<&String> = members.iter().collect();
      sorted.sort();
      for member in sorted {
        writeln!(f, "        {};", member)?;
      }
    }
    writeln!(f, "}} {};", self.previous.as_deref().unwrap_or(""))
  }
}

impl fmt::Display for Map {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for release in self.releases() {
      writeln!(f, "{}", release)?;
    }
    Ok(())
  }
}

/// Render a map as version script text
pub fn render(map: &Map) -> String {
  map.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::diagnostics::Diagnostics;
  use crate::script::model::{GLOBAL, LOCAL};
  use proptest::prelude::*;

  #[test]
  fn test_release_layout() {
    let release = Release::new("LIBFOO_1_1")
      .with_previous(Some("LIBFOO_1_0".to_string()))
      .with_scope(GLOBAL, ["foo", "bar"]);
    assert_eq!(
      release.to_string(),
      "LIBFOO_1_1\n{\n    global:\n        bar;\n        foo;\n} LIBFOO_1_0;\n"
    );
  }

  #[test]
  fn test_base_release_with_marker() {
    let mut release = Release::new("LIBFOO_1_0")
      .with_scope(LOCAL, ["*"])
      .with_scope(GLOBAL, ["foo"]);
    release.released = true;
    assert_eq!(
      release.to_string(),
      "LIBFOO_1_0    # Released\n{\n    global:\n        foo;\n    local:\n        *;\n} ;\n"
    );
  }

  #[test]
  fn test_map_separates_releases_with_blank_line() {
    let mut map = Map::new();
    map.push(Release::new("A_1").with_scope(GLOBAL, ["a"]));
    map.push(Release::new("A_2").with_previous(Some("A_1".to_string())));
    assert_eq!(
      render(&map),
      "A_1\n{\n    global:\n        a;\n} ;\n\nA_2\n{\n} A_1;\n\n"
    );
  }

  #[test]
  fn test_render_of_hand_written_script_is_stable() {
    let text = "LIBX_2 {  global: zed; alpha; local: *; } LIBX_1;\nLIBX_1 #released\n{ global: one; };";
    let mut diags = Diagnostics::new();
    let first = render(&Map::parse(text, None, &mut diags).unwrap());
    let second = render(&Map::parse(&first, None, &mut diags).unwrap());
    assert_eq!(first, second);
    assert!(first.contains("LIBX_1    # Released\n"));
  }

  fn ident() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
  }

  fn release() -> impl Strategy<Value = Release> {
    (
      ident(),
      proptest::option::of(ident()),
      proptest::collection::btree_map(
        ident(),
        proptest::collection::vec(prop_oneof![ident(), Just("*".to_string())], 0..4),
        0..3,
      ),
      any::<bool>(),
    )
      .prop_map(|(name, previous, symbols, released)| Release {
        name,
        previous,
        symbols,
        released,
      })
  }

  proptest! {
    #[test]
    fn prop_render_parse_is_idempotent(releases in proptest::collection::vec(release(), 0..5)) {
      let mut map = Map::new();
      map.replace_releases(releases);
      let first = render(&map);

      let mut diags = Diagnostics::new();
      let reparsed = Map::parse(&first, None, &mut diags).unwrap();
      prop_assert_eq!(render(&reparsed), first);
    }
  }
}
