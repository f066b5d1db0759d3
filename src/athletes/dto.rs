use serde::Deserialize;

use super::repo_types::AthleteFields;
use crate::{error::AppError, validate};

#[derive(Debug, Deserialize)]
pub struct AthleteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_m: Option<f64>,
}

impl AthleteRequest {
    /// Validates the optional fields; `name` is checked by the caller since
    /// it is required on create only.
    pub fn into_fields(self) -> Result<AthleteFields, AppError> {
        let name = match self.name.as_deref() {
            Some(raw) => Some(validate::required_text("name", raw, 100)?),
            None => None,
        };
        let email = validate::optional_text("email", self.email.as_deref(), 254)?;
        if let Some(e) = &email {
            if !e.contains('@') {
                return Err(AppError::Validation("email is not valid".into()));
            }
        }
        Ok(AthleteFields {
            name,
            email,
            phone: validate::optional_text("phone", self.phone.as_deref(), 32)?,
            weight_kg: validate::non_negative("weight_kg", self.weight_kg)?,
            height_m: validate::non_negative("height_m", self.height_m)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AthleteRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn trims_and_keeps_optionals() {
        let f = parse(r#"{"name":" John Smith ","weight_kg":75.0,"height_m":1.8}"#)
            .into_fields()
            .unwrap();
        assert_eq!(f.name.as_deref(), Some("John Smith"));
        assert_eq!(f.weight_kg, Some(75.0));
        assert_eq!(f.email, None);
    }

    #[test]
    fn rejects_blank_name_and_bad_email() {
        assert!(parse(r#"{"name":"  "}"#).into_fields().is_err());
        assert!(parse(r#"{"name":"A","email":"nope"}"#).into_fields().is_err());
        assert!(parse(r#"{"name":"A","weight_kg":-3}"#).into_fields().is_err());
    }
}
