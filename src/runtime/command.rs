use crate::core::fields::FieldName;

/// User interactions the presentation layer forwards to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    UpdateField { field: FieldName, value: String },
    Blur { field: FieldName },
    Submit,
}

impl Command {
    pub fn update(field: FieldName, value: impl Into<String>) -> Self {
        Self::UpdateField {
            field,
            value: value.into(),
        }
    }
}
