use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Channel a contact method reaches a person through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    #[default]
    Email,
    Phone,
    Mobile,
    Other,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Mobile => "mobile",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "email" | "e-mail" => Self::Email,
            "phone" => Self::Phone,
            "mobile" => Self::Mobile,
            _ => Self::Other,
        }
    }
}

/// An address (or number) registered for a person besides their primary e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethod {
    pub id: Uuid,
    pub person_id: Uuid,
    pub method: MethodKind,
    pub detail: String,
}

impl ContactMethod {
    pub fn new(person_id: Uuid, method: MethodKind, detail: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            person_id,
            method,
            detail: detail.into(),
        }
    }

    pub fn email(person_id: Uuid, detail: impl Into<String>) -> Self {
        Self::new(person_id, MethodKind::Email, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_kind_parse() {
        assert_eq!(MethodKind::parse("email"), MethodKind::Email);
        assert_eq!(MethodKind::parse("E-Mail"), MethodKind::Email);
        assert_eq!(MethodKind::parse(" Phone "), MethodKind::Phone);
        assert_eq!(MethodKind::parse("mobile"), MethodKind::Mobile);
        assert_eq!(MethodKind::parse("fax"), MethodKind::Other);
    }

    #[test]
    fn test_method_kind_as_str_parses_back() {
        for kind in [MethodKind::Email, MethodKind::Phone, MethodKind::Mobile, MethodKind::Other] {
            assert_eq!(MethodKind::parse(kind.as_str()), kind);
        }
    }
}
