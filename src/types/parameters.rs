//! Parameters
//!
//! Ordered, multi-valued string map used for flat form fields and query
//! strings. Keys keep their first-insertion order and every key owns an
//! ordered list of values.

use std::borrow::Cow;

/// Immutable ordered multi-map of form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, Vec<String>)>,
}

impl Parameters {
    /// The empty instance, used as the default form data.
    pub const EMPTY: Parameters = Parameters {
        entries: Vec::new(),
    };

    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values stored under `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_all(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Flattened key/value pairs in wire order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize as `application/x-www-form-urlencoded`.
    pub fn form_url_encode(&self) -> String {
        form_url_encode_pairs(self.pairs())
    }

    /// Parse an `application/x-www-form-urlencoded` string.
    ///
    /// Empty segments are skipped and a segment without `=` yields an empty
    /// value.
    pub fn parse_form_urlencoded(input: &str) -> Parameters {
        let mut builder = ParametersBuilder::default();
        for segment in input.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            builder.append(decode_form_component(key), decode_form_component(value));
        }
        builder.build()
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = ParametersBuilder::default();
        for (key, value) in iter {
            builder.append(key, value);
        }
        builder.build()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a [String])> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.entries())
    }
}

/// Mutable counterpart of [`Parameters`].
#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    entries: Vec<(String, Vec<String>)>,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `name`, keeping any existing values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
        self
    }

    pub fn append_all<I, V>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        for value in values {
            self.append(name.clone(), value);
        }
        self
    }

    /// Append every pair of `parameters`, preserving order and duplicates.
    pub fn append_parameters(&mut self, parameters: &Parameters) -> &mut Self {
        for (key, value) in parameters.pairs() {
            self.append(key, value);
        }
        self
    }

    /// Replace all values of `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, values)) => *values = vec![value],
            None => self.entries.push((name, vec![value])),
        }
        self
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.entries.retain(|(key, _)| key != name);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Snapshot of the current contents.
    pub fn snapshot(&self) -> Parameters {
        Parameters {
            entries: self.entries.clone(),
        }
    }

    pub fn build(self) -> Parameters {
        Parameters {
            entries: self.entries,
        }
    }
}

/// Percent-encode one form component: unreserved characters are kept,
/// space becomes `+`, every other byte is `%XX`.
pub fn encode_form_component(input: &str) -> String {
    // `%` itself is escaped, so `%20` in the output can only come from a space.
    urlencoding::encode(input).replace("%20", "+")
}

/// Inverse of [`encode_form_component`]. Invalid UTF-8 is replaced lossily.
pub fn decode_form_component(input: &str) -> String {
    let plus_decoded = input.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(plus_decoded.as_bytes()))
            .into_owned(),
    }
}

pub(crate) fn form_url_encode_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_form_component(key),
                encode_form_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_default() {
        assert_eq!(Parameters::EMPTY, Parameters::default());
        assert!(Parameters::EMPTY.is_empty());
        assert_eq!(Parameters::EMPTY.form_url_encode(), "");
    }

    #[test]
    fn append_keeps_key_order_and_values() {
        let mut builder = Parameters::builder();
        builder.append("b", "1").append("a", "2").append("b", "3");
        let params = builder.build();

        assert_eq!(params.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(
            params.get_all("b"),
            Some(&["1".to_string(), "3".to_string()][..])
        );
        assert_eq!(params.get("a"), Some("2"));
        assert_eq!(
            params.pairs().collect::<Vec<_>>(),
            vec![("b", "1"), ("b", "3"), ("a", "2")]
        );
    }

    #[test]
    fn set_and_remove() {
        let mut builder = ParametersBuilder::new();
        builder.append("k", "1").append("k", "2").set("k", "3");
        assert_eq!(builder.get_all("k"), Some(&["3".to_string()][..]));
        builder.remove("k");
        assert!(builder.is_empty());
    }

    #[test]
    fn encodes_reserved_characters() {
        let params: Parameters = [("q", "cats & dogs"), ("sym", "a=b/c?d"), ("utf", "é")]
            .into_iter()
            .collect();
        assert_eq!(
            params.form_url_encode(),
            "q=cats+%26+dogs&sym=a%3Db%2Fc%3Fd&utf=%C3%A9"
        );
    }

    #[test]
    fn literal_plus_and_percent_survive() {
        let params: Parameters = [("math", "1+1=2 100%")].into_iter().collect();
        let encoded = params.form_url_encode();
        assert_eq!(encoded, "math=1%2B1%3D2+100%25");
        assert_eq!(Parameters::parse_form_urlencoded(&encoded), params);
    }

    #[test]
    fn parse_handles_missing_values_and_empty_segments() {
        let params = Parameters::parse_form_urlencoded("a=1&&flag&a=2");
        assert_eq!(
            params.pairs().collect::<Vec<_>>(),
            vec![("a", "1"), ("a", "2"), ("flag", "")]
        );
    }
}
