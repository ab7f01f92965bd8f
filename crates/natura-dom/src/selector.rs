//! Element Query and Methods
//!
//! querySelector, querySelectorAll, closest and matches over compound
//! selectors (`tag#id.class[attr="value"]`) and comma-separated lists.
//! Combinators are not supported.

use std::str::FromStr;

use crate::{DomError, DomResult, DomTree, NodeId};

/// Element query trait
pub trait ElementQuery {
    /// First descendant of `root` matching the selector
    fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId>;

    /// All descendants of `root` matching the selector, in document order
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// Closest inclusive ancestor matching the selector
    fn closest(&self, element: NodeId, selector: &str) -> Option<NodeId>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> bool;
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parse a selector list
    pub fn parse(s: &str) -> DomResult<Self> {
        let alternatives = s
            .split(',')
            .map(|part| parse_compound(part).ok_or_else(|| DomError::InvalidSelector(s.to_string())))
            .collect::<DomResult<Vec<_>>>()?;
        Ok(Self { alternatives })
    }

    /// Check whether an element matches any alternative
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.element(node).is_some_and(|elem| {
            self.alternatives.iter().any(|c| {
                c.tag.as_deref().is_none_or(|t| t == elem.tag)
                    && c.id.as_deref().is_none_or(|id| elem.id() == Some(id))
                    && c.classes.iter().all(|cl| elem.class_list.contains(cl))
                    && c.attrs.iter().all(|a| match (&a.value, elem.get_attr(&a.name)) {
                        (_, None) => false,
                        (None, Some(_)) => true,
                        (Some(want), Some(got)) => want == got,
                    })
            })
        })
    }

    /// All matching descendants of `root`
    pub fn query_all(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .into_iter()
            .filter(|&n| self.matches(tree, n))
            .collect()
    }

    /// First matching descendant of `root`
    pub fn query(&self, tree: &DomTree, root: NodeId) -> Option<NodeId> {
        tree.descendants(root)
            .into_iter()
            .find(|&n| self.matches(tree, n))
    }

    /// Closest inclusive ancestor that matches
    pub fn closest(&self, tree: &DomTree, node: NodeId) -> Option<NodeId> {
        std::iter::once(node)
            .chain(tree.ancestors(node))
            .find(|&n| self.matches(tree, n))
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], i: &mut usize) -> Option<String> {
    let start = *i;
    while *i < chars.len() && is_ident_char(chars[*i]) {
        *i += 1;
    }
    (*i > start).then(|| chars[start..*i].iter().collect())
}

fn read_value(chars: &[char], i: &mut usize) -> Option<String> {
    match chars.get(*i) {
        Some(&q) if q == '"' || q == '\'' => {
            let start = *i + 1;
            let end = start + chars[start..].iter().position(|&c| c == q)?;
            *i = end + 1;
            Some(chars[start..end].iter().collect())
        }
        _ => read_ident(chars, i),
    }
}

fn skip_ws(chars: &[char], i: &mut usize) {
    while *i < chars.len() && chars[*i].is_whitespace() {
        *i += 1;
    }
}

fn parse_compound(s: &str) -> Option<Compound> {
    let chars: Vec<char> = s.trim().chars().collect();
    if chars.is_empty() {
        return None;
    }
    let mut i = 0;
    let mut compound = Compound::default();

    if chars[0] == '*' {
        i = 1;
    } else if let Some(tag) = read_ident(&chars, &mut i) {
        compound.tag = Some(tag.to_ascii_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                compound.id = Some(read_ident(&chars, &mut i)?);
            }
            '.' => {
                i += 1;
                compound.classes.push(read_ident(&chars, &mut i)?);
            }
            '[' => {
                i += 1;
                skip_ws(&chars, &mut i);
                let name = read_ident(&chars, &mut i)?.to_ascii_lowercase();
                skip_ws(&chars, &mut i);
                let value = if chars.get(i) == Some(&'=') {
                    i += 1;
                    skip_ws(&chars, &mut i);
                    Some(read_value(&chars, &mut i)?)
                } else {
                    None
                };
                skip_ws(&chars, &mut i);
                if chars.get(i) != Some(&']') {
                    return None;
                }
                i += 1;
                compound.attrs.push(AttrMatch { name, value });
            }
            _ => return None,
        }
    }
    Some(compound)
}

impl ElementQuery for DomTree {
    fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        parsed(selector)?.query(self, root)
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        parsed(selector)
            .map(|s| s.query_all(self, root))
            .unwrap_or_default()
    }

    fn closest(&self, element: NodeId, selector: &str) -> Option<NodeId> {
        parsed(selector)?.closest(self, element)
    }

    fn matches(&self, element: NodeId, selector: &str) -> bool {
        parsed(selector).is_some_and(|s| s.matches(self, element))
    }
}

fn parsed(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(s) => Some(s),
        Err(err) => {
            tracing::warn!("{}", err);
            None
        }
    }
}
