//! HTML tag rendering for resolved asset paths.

use std::collections::BTreeMap;

use crate::error::{AssetError, Result};

const BOOLEAN_ATTRIBUTES: &[&str] = &["async", "defer"];

/// Attribute set of a rendered tag, keyed by attribute name.
///
/// Later assignments to the same name replace earlier ones. Attributes render in
/// name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
  /// Build an attribute set from a flat `key, value, key, value, ...` list.
  pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
    let mut attributes = Self::default();
    attributes.extend_pairs(pairs)?;
    Ok(attributes)
  }

  /// Apply a flat `key, value, ...` list on top of the current attributes.
  pub fn extend_pairs<S: AsRef<str>>(&mut self, pairs: &[S]) -> Result<()> {
    if pairs.len() % 2 != 0 {
      return Err(AssetError::MalformedAttributes { count: pairs.len() });
    }

    for pair in pairs.chunks_exact(2) {
      self.set(pair[0].as_ref(), pair[1].as_ref());
    }
    Ok(())
  }

  /// Set `name` to `value`, replacing any previous value.
  pub fn set(&mut self, name: &str, value: &str) {
    self.0.insert(name.to_string(), value.to_string());
  }

  /// Value of the attribute called `name`.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.get(name).map(String::as_str)
  }

  /// Serialise into `key="value"` pairs joined by single spaces.
  ///
  /// `async` and `defer` render as bare names. Every other name and value is escaped.
  pub fn render(&self) -> String {
    self
      .0
      .iter()
      .map(|(name, value)| {
        if BOOLEAN_ATTRIBUTES.contains(&name.as_str()) {
          name.clone()
        } else {
          format!("{}=\"{}\"", escape_html(name), escape_html(value))
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// Escape text for use inside HTML attribute names and values.
pub fn escape_html(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for ch in input.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Render `<script ...></script>` with `src` forced to `src`.
pub fn render_script_tag<S: AsRef<str>>(src: &str, pairs: &[S]) -> Result<String> {
  let mut attributes = Attributes::from_pairs(pairs)?;
  attributes.set("src", src);
  Ok(format!("<script {}></script>", attributes.render()))
}

/// Render `<link .../>` with `rel="stylesheet"` unless overridden and `href` forced.
pub fn render_link_tag<S: AsRef<str>>(href: &str, pairs: &[S]) -> Result<String> {
  let mut attributes = Attributes::default();
  attributes.set("rel", "stylesheet");
  attributes.extend_pairs(pairs)?;
  attributes.set("href", href);
  Ok(format!("<link {}/>", attributes.render()))
}

#[cfg(test)]
mod tests {
  use super::*;

  const NO_ATTRS: &[&str] = &[];

  #[test]
  fn renders_plain_attribute() {
    let attributes = Attributes::from_pairs(&["data-test", "value"]).unwrap();
    assert_eq!(attributes.render(), "data-test=\"value\"");
  }

  #[test]
  fn escapes_names_and_values() {
    let attributes = Attributes::from_pairs(&["shouldEscape<>", ">"]).unwrap();
    assert_eq!(attributes.render(), "shouldEscape&lt;&gt;=\"&gt;\"");

    let tag = render_link_tag("/a.css", &["title", "<b>\"Tom & 'Jerry'\"</b>"]).unwrap();
    assert!(tag.contains("title=\"&lt;b&gt;&quot;Tom &amp; &#39;Jerry&#39;&quot;&lt;/b&gt;\""));
    assert!(!tag.contains("<b>"));
  }

  #[test]
  fn renders_boolean_attributes_bare() {
    let tag = render_script_tag("x.js", &["defer", ""]).unwrap();
    assert_eq!(tag, "<script defer src=\"x.js\"></script>");
    assert!(!tag.contains("defer=\"\""));

    let tag = render_script_tag("x.js", &["async", "true", "type", "module"]).unwrap();
    assert_eq!(tag, "<script async src=\"x.js\" type=\"module\"></script>");
  }

  #[test]
  fn link_defaults_to_stylesheet() {
    let tag = render_link_tag("/style.css?v=123", NO_ATTRS).unwrap();
    assert_eq!(tag, "<link href=\"/style.css?v=123\" rel=\"stylesheet\"/>");
  }

  #[test]
  fn caller_rel_overrides_default() {
    let tag = render_link_tag("/font.woff2", &["rel", "preload", "as", "font"]).unwrap();
    assert_eq!(tag, "<link as=\"font\" href=\"/font.woff2\" rel=\"preload\"/>");
  }

  #[test]
  fn forced_source_wins_over_caller() {
    let tag = render_script_tag("/real.js", &["src", "/fake.js"]).unwrap();
    assert_eq!(tag, "<script src=\"/real.js\"></script>");
  }

  #[test]
  fn odd_attribute_list_is_rejected() {
    let err = render_script_tag("x.js", &["type"]).unwrap_err();
    assert!(matches!(err, AssetError::MalformedAttributes { count: 1 }));
    assert!(render_link_tag("x.css", &["a", "b", "c"]).is_err());
  }
}
