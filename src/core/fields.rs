use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Name,
    Email,
    StudentYear,
    OtherYear,
    Instrument,
    InterestSubject,
    Message,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::StudentYear,
        FieldName::OtherYear,
        FieldName::Instrument,
        FieldName::InterestSubject,
        FieldName::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::StudentYear => "studentYear",
            Self::OtherYear => "otherYear",
            Self::Instrument => "instrument",
            Self::InterestSubject => "interestSubject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| format!("unknown form field '{value}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentYear {
    #[default]
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Graduate,
    Faculty,
    Other,
}

impl StudentYear {
    pub const ALL: [StudentYear; 7] = [
        StudentYear::Freshman,
        StudentYear::Sophomore,
        StudentYear::Junior,
        StudentYear::Senior,
        StudentYear::Graduate,
        StudentYear::Faculty,
        StudentYear::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Freshman => "freshman",
            Self::Sophomore => "sophomore",
            Self::Junior => "junior",
            Self::Senior => "senior",
            Self::Graduate => "graduate",
            Self::Faculty => "faculty",
            Self::Other => "other",
        }
    }
}

impl FromStr for StudentYear {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|year| year.as_str() == value)
            .ok_or_else(|| format!("unknown student year '{value}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestSubject {
    #[default]
    Join,
    Workshop,
    Perform,
    Collaborate,
    General,
}

impl InterestSubject {
    pub const ALL: [InterestSubject; 5] = [
        InterestSubject::Join,
        InterestSubject::Workshop,
        InterestSubject::Perform,
        InterestSubject::Collaborate,
        InterestSubject::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Workshop => "workshop",
            Self::Perform => "perform",
            Self::Collaborate => "collaborate",
            Self::General => "general",
        }
    }
}

impl FromStr for InterestSubject {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subject| subject.as_str() == value)
            .ok_or_else(|| format!("unknown interest subject '{value}'"))
    }
}

/// Raw form values as the presentation layer hands them over.
///
/// Select fields are kept as text too; [`StudentYear`] and
/// [`InterestSubject`] only supply defaults and option lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub student_year: String,
    pub other_year: String,
    pub instrument: String,
    pub interest_subject: String,
    pub message: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            student_year: StudentYear::default().as_str().to_string(),
            other_year: String::new(),
            instrument: String::new(),
            interest_subject: InterestSubject::default().as_str().to_string(),
            message: String::new(),
        }
    }
}

impl FormFields {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::StudentYear => &self.student_year,
            FieldName::OtherYear => &self.other_year,
            FieldName::Instrument => &self.instrument,
            FieldName::InterestSubject => &self.interest_subject,
            FieldName::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Name => &mut self.name,
            FieldName::Email => &mut self.email,
            FieldName::StudentYear => &mut self.student_year,
            FieldName::OtherYear => &mut self.other_year,
            FieldName::Instrument => &mut self.instrument,
            FieldName::InterestSubject => &mut self.interest_subject,
            FieldName::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn wants_other_year(&self) -> bool {
        self.student_year == StudentYear::Other.as_str()
    }

    /// The single year value sent to a sink.
    pub fn resolved_year(&self) -> &str {
        if self.wants_other_year() {
            &self.other_year
        } else {
            &self.student_year
        }
    }
}
