//! Inline style declarations
//!
//! Only the inline `style` attribute participates in styling; custom
//! properties (`--name`) inherit through ancestors like CSS variables.

/// Parsed `style` attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse `name: value; name: value` declarations
    pub fn parse(css: &str) -> Self {
        let mut style = Self::default();
        for decl in css.split(';') {
            if let Some((name, value)) = decl.split_once(':') {
                let name = name.trim();
                let value = value.trim();
                if !name.is_empty() {
                    style.set(name, value);
                }
            }
        }
        style
    }

    /// Declared value; custom properties are case-sensitive
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = normalize(name);
        self.declarations
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace a declaration
    pub fn set(&mut self, name: &str, value: &str) {
        let name = normalize(name);
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
    }

    /// Length value in px (bare numbers count as px)
    pub fn px(&self, name: &str) -> Option<f64> {
        let raw = self.get(name)?.trim();
        let number = raw.strip_suffix("px").unwrap_or(raw).trim();
        number.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to `name: value; ...`
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn normalize(name: &str) -> String {
    if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

/// Leading-integer parse: optional sign then digits, trailing garbage ignored
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    rest[..digits].parse::<i64>().ok().map(|v| sign * v)
}
