use serde::Deserialize;

use super::repo_types::CategoryFields;
use crate::{error::AppError, validate};

/// Body for creating or replacing a food category. Macros are per 100 g.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub kcal: Option<f64>,
}

impl CategoryRequest {
    pub fn into_fields(self) -> Result<CategoryFields, AppError> {
        Ok(CategoryFields {
            name: validate::required_text("name", &self.name, 100)?,
            protein: validate::non_negative("protein", self.protein)?,
            carbs: validate::non_negative("carbs", self.carbs)?,
            fat: validate::non_negative("fat", self.fat)?,
            kcal: validate::non_negative("kcal", self.kcal)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_macros_stay_unset() {
        let req: CategoryRequest = serde_json::from_str(r#"{"name":" oats ","kcal":389}"#).unwrap();
        let fields = req.into_fields().unwrap();
        assert_eq!(fields.name, "oats");
        assert_eq!(fields.kcal, Some(389.0));
        assert_eq!(fields.protein, None);
        assert_eq!(fields.fat, None);
    }

    #[test]
    fn rejects_negative_macro() {
        let req: CategoryRequest =
            serde_json::from_str(r#"{"name":"bad","fat":-1.0}"#).unwrap();
        assert!(matches!(req.into_fields(), Err(AppError::Validation(_))));
    }
}
