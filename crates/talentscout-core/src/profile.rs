//! Candidate fields and the order they are collected in.

use serde::{Deserialize, Serialize};

/// One collected field, in collection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    Phone,
    YearsExperience,
    DesiredPosition,
    Location,
    TechStack,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FullName,
        Field::Email,
        Field::Phone,
        Field::YearsExperience,
        Field::DesiredPosition,
        Field::Location,
        Field::TechStack,
    ];

    pub fn index(self) -> usize {
        match self {
            Field::FullName => 0,
            Field::Email => 1,
            Field::Phone => 2,
            Field::YearsExperience => 3,
            Field::DesiredPosition => 4,
            Field::Location => 5,
            Field::TechStack => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Field> {
        Self::ALL.get(index).copied()
    }

    pub fn first() -> Field {
        Field::FullName
    }

    /// The field collected after this one, or None for the last field
    pub fn next(self) -> Option<Field> {
        Self::from_index(self.index() + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::YearsExperience => "years_experience",
            Field::DesiredPosition => "desired_position",
            Field::Location => "location",
            Field::TechStack => "tech_stack",
        }
    }

    /// A valid answer shown to the candidate after a rejection
    pub fn example(self) -> &'static str {
        match self {
            Field::FullName => "Jane Doe",
            Field::Email => "jane.doe@example.com",
            Field::Phone => "+1 (555) 123-4567",
            Field::YearsExperience => "5",
            Field::DesiredPosition => "Backend Engineer",
            Field::Location => "Lisbon, Portugal",
            Field::TechStack => "Python, React, PostgreSQL",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized, accepted answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Years(u8),
    TechStack(Vec<String>),
}

impl FieldValue {
    /// Render the value back as candidate input.
    ///
    /// Validating this string again yields the same value.
    pub fn to_input(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Years(y) => y.to_string(),
            FieldValue::TechStack(items) => items.join(", "),
        }
    }
}

/// Everything collected about the candidate.
///
/// Each field is written once, in [`Field::ALL`] order, and never revised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    full_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    years_experience: Option<u8>,
    desired_position: Option<String>,
    location: Option<String>,
    tech_stack: Option<Vec<String>>,
}

impl CandidateProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn years_experience(&self) -> Option<u8> {
        self.years_experience
    }

    pub fn desired_position(&self) -> Option<&str> {
        self.desired_position.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Declared tech stack, empty until collected
    pub fn tech_stack(&self) -> &[String] {
        self.tech_stack.as_deref().unwrap_or(&[])
    }

    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::FullName => self.full_name.is_some(),
            Field::Email => self.email.is_some(),
            Field::Phone => self.phone.is_some(),
            Field::YearsExperience => self.years_experience.is_some(),
            Field::DesiredPosition => self.desired_position.is_some(),
            Field::Location => self.location.is_some(),
            Field::TechStack => self.tech_stack.is_some(),
        }
    }

    /// Store an accepted value.
    ///
    /// Returns false without writing when the field is already set or the
    /// value kind does not fit the field.
    pub(crate) fn accept(&mut self, field: Field, value: FieldValue) -> bool {
        if self.is_set(field) {
            return false;
        }
        match (field, value) {
            (Field::FullName, FieldValue::Text(v)) => self.full_name = Some(v),
            (Field::Email, FieldValue::Text(v)) => self.email = Some(v),
            (Field::Phone, FieldValue::Text(v)) => self.phone = Some(v),
            (Field::YearsExperience, FieldValue::Years(v)) => self.years_experience = Some(v),
            (Field::DesiredPosition, FieldValue::Text(v)) => self.desired_position = Some(v),
            (Field::Location, FieldValue::Text(v)) => self.location = Some(v),
            (Field::TechStack, FieldValue::TechStack(v)) => self.tech_stack = Some(v),
            _ => return false,
        }
        true
    }
}
