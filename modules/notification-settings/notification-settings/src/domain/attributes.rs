use std::collections::HashMap;

use notification_settings_sdk::AttributeDescriptor;

use super::backend::AttributeValue;
use super::error::DomainError;
use super::fields::ATTRIBUTE_CODES;

/// Attribute descriptors resolved at load time, keyed by backend id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeIndex {
    by_id: HashMap<String, AttributeDescriptor>,
}

impl AttributeIndex {
    /// Builds the index, requiring every code in [`ATTRIBUTE_CODES`].
    ///
    /// # Errors
    /// Returns [`DomainError::MissingAttributes`] listing the absent codes.
    pub fn resolve(attributes: Vec<AttributeDescriptor>) -> Result<Self, DomainError> {
        let missing: Vec<String> = ATTRIBUTE_CODES
            .iter()
            .filter(|code| !attributes.iter().any(|attr| attr.code == **code))
            .map(|code| (*code).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::MissingAttributes(missing));
        }

        let by_id = attributes
            .into_iter()
            .map(|attr| (attr.id.clone(), attr))
            .collect();
        Ok(Self { by_id })
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AttributeDescriptor> {
        self.by_id.get(id)
    }

    #[must_use]
    pub fn id_for_code(&self, code: &str) -> Option<&str> {
        self.by_id
            .values()
            .find(|attr| attr.code == code)
            .map(|attr| attr.id.as_str())
    }

    /// Boolean stored for `code` among `values`.
    ///
    /// Only the literal `"true"` counts as set; a missing entry is `false`.
    #[must_use]
    pub fn flag(&self, values: &[AttributeValue], code: &str) -> bool {
        values
            .iter()
            .filter(|entry| {
                self.get(&entry.attribute.id)
                    .is_some_and(|attr| attr.code == code)
            })
            .next_back()
            .is_some_and(|entry| entry.value == "true")
    }
}
