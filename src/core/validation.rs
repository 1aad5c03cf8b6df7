use crate::core::fields::{FieldName, FormFields};
use crate::core::validators::{self, Validator, run_validators};
use std::sync::LazyLock;

pub const NAME_ERROR: &str = "Name must be at least 2 characters";
pub const EMAIL_ERROR: &str = "Please enter a valid email address";
pub const MESSAGE_ERROR: &str = "Message must be at least 10 characters";
pub const OTHER_YEAR_ERROR: &str = "Please specify your year";

/// Fields re-checked on every submit, in display order.
pub const SUBMIT_FIELDS: [FieldName; 3] = [FieldName::Name, FieldName::Email, FieldName::Message];

pub type FormValidator = Box<dyn Fn(&FormFields) -> Vec<(FieldName, String)> + Send + Sync>;

struct FieldRules {
    name: Vec<Validator>,
    email: Vec<Validator>,
    message: Vec<Validator>,
}

static FIELD_RULES: LazyLock<FieldRules> = LazyLock::new(|| FieldRules {
    name: vec![validators::min_length(2, NAME_ERROR)],
    email: vec![validators::email(EMAIL_ERROR)],
    message: vec![validators::min_length(10, MESSAGE_ERROR)],
});

pub fn field_validators(field: FieldName) -> &'static [Validator] {
    let rules = &*FIELD_RULES;
    match field {
        FieldName::Name => rules.name.as_slice(),
        FieldName::Email => rules.email.as_slice(),
        FieldName::Message => rules.message.as_slice(),
        FieldName::StudentYear
        | FieldName::OtherYear
        | FieldName::Instrument
        | FieldName::InterestSubject => &[],
    }
}

pub fn validate_field(field: FieldName, value: &str) -> Result<(), String> {
    run_validators(field_validators(field), value)
}

/// Cross-field rules that only make sense against the whole form.
pub fn form_validators() -> Vec<FormValidator> {
    vec![Box::new(|fields: &FormFields| {
        if fields.wants_other_year() && fields.other_year.trim().is_empty() {
            vec![(FieldName::OtherYear, OTHER_YEAR_ERROR.to_string())]
        } else {
            Vec::new()
        }
    })]
}

pub fn validate_for_submit(
    fields: &FormFields,
    form_validators: &[FormValidator],
) -> Vec<(FieldName, String)> {
    let mut errors: Vec<(FieldName, String)> = SUBMIT_FIELDS
        .into_iter()
        .filter_map(|field| {
            validate_field(field, fields.get(field))
                .err()
                .map(|err| (field, err))
        })
        .collect();

    for validator in form_validators {
        errors.extend(validator(fields));
    }

    errors
}
