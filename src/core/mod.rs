pub mod fields;
pub mod payload;
pub mod validation;
pub mod validators;

pub use fields::{FieldName, FormFields, InterestSubject, StudentYear};
pub use payload::{ContactPayload, RelayPayload};
pub use validation::{FormValidator, validate_field};
