/// Case-insensitive, multi-valued HTTP header map.
///
/// Keys are stored in canonical MIME form (`content-type` becomes
/// `Content-Type`) and compared ignoring ASCII case. Iteration follows the
/// order in which keys were first inserted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every value stored under `key` with `value`.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let value = value.into();
        match self.position(key.as_ref()) {
            Some(idx) => self.entries[idx].1 = vec![value],
            None => self
                .entries
                .push((canonical_key(key.as_ref()), vec![value])),
        }
    }

    /// Adds `value` after any values already stored under `key`.
    pub fn append(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let value = value.into();
        match self.position(key.as_ref()) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self
                .entries
                .push((canonical_key(key.as_ref()), vec![value])),
        }
    }

    /// Returns the first value for `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.get_all(key)
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.position(key)
            .map(|idx| self.entries[idx].1.as_slice())
            .unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Removes `key` and returns its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(key))
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (key, value) in iter {
            headers.append(key, value);
        }
        headers
    }
}

impl From<&reqwest::header::HeaderMap> for HeaderMap {
    fn from(headers: &reqwest::header::HeaderMap) -> Self {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

/// Canonical MIME form of `key`: first letter and every letter following a
/// hyphen upper-cased, the rest lower-cased. Keys with bytes outside the
/// HTTP token set are returned unchanged.
fn canonical_key(key: &str) -> String {
    if !key.bytes().all(is_token_byte) {
        return key.to_owned();
    }

    let mut upper = true;
    key.chars()
        .map(|ch| {
            let mapped = if upper {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            };
            upper = ch == '-';
            mapped
        })
        .collect()
}

fn is_token_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&byte)
}
