//! URL-encoded form body

use crate::defaults::content::FORM_URL_ENCODED;
use crate::types::Parameters;
use bytes::Bytes;

/// `application/x-www-form-urlencoded` body built from [`Parameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDataContent {
    form_data: Parameters,
    encoded: String,
}

impl FormDataContent {
    pub fn new(form_data: Parameters) -> Self {
        let encoded = form_data.form_url_encode();
        Self { form_data, encoded }
    }

    pub fn form_data(&self) -> &Parameters {
        &self.form_data
    }

    pub fn content_type(&self) -> &'static str {
        FORM_URL_ENCODED
    }

    /// The encoded payload.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn content_length(&self) -> u64 {
        self.encoded.len() as u64
    }

    pub fn bytes(&self) -> Bytes {
        Bytes::from(self.encoded.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_pairs_in_order() {
        let content = FormDataContent::new(
            [("user", "Ann Lee"), ("tag", "a"), ("tag", "b")]
                .into_iter()
                .collect(),
        );
        assert_eq!(content.as_str(), "user=Ann+Lee&tag=a&tag=b");
        assert_eq!(content.content_type(), "application/x-www-form-urlencoded");
        assert_eq!(content.content_length(), 24);
    }

    #[test]
    fn decodes_back_to_same_parameters() {
        let params: Parameters = [("k", "v&w"), ("k", "x y"), ("é", "")].into_iter().collect();
        let content = FormDataContent::new(params.clone());
        assert_eq!(Parameters::parse_form_urlencoded(content.as_str()), params);
    }
}
