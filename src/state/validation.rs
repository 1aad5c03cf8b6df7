use crate::core::fields::FieldName;
use indexmap::IndexMap;
use serde::Serialize;

/// Inline error messages keyed by field, in the order they were raised.
/// A field with no entry currently shows no error.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: IndexMap<FieldName, String>,
}

impl ValidationErrors {
    pub fn set_error(&mut self, field: FieldName, error: impl Into<String>) {
        self.entries.insert(field, error.into());
    }

    pub fn clear_error(&mut self, field: FieldName) -> bool {
        self.entries.shift_remove(&field).is_some()
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn replace_all(&mut self, errors: impl IntoIterator<Item = (FieldName, String)>) {
        self.entries = errors.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.entries.iter().map(|(field, error)| (*field, error.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationErrors;
    use crate::core::fields::FieldName;

    #[test]
    fn clear_keeps_remaining_order() {
        let mut errors = ValidationErrors::default();
        errors.set_error(FieldName::Name, "a");
        errors.set_error(FieldName::Email, "b");
        errors.set_error(FieldName::Message, "c");

        assert!(errors.clear_error(FieldName::Email));
        assert!(!errors.clear_error(FieldName::Email));
        let order: Vec<FieldName> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(order, vec![FieldName::Name, FieldName::Message]);
    }

    #[test]
    fn serializes_as_form_keyed_object() {
        let mut errors = ValidationErrors::default();
        errors.set_error(FieldName::OtherYear, "Please specify your year");
        assert_eq!(
            serde_json::to_string(&errors).expect("serialize"),
            r#"{"otherYear":"Please specify your year"}"#
        );
    }
}
