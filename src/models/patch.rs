//! Tri-state field for partial updates.

use serde::{Deserialize, Deserializer};

/// A field in an edit payload.
///
/// Combined with `#[serde(default)]` on the containing struct field, a key
/// that is missing from the JSON body stays `Absent`, `"key": null` becomes
/// `Null` and any other value becomes `Value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

/// A field that must not be cleared was sent as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullField(pub &'static str);

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> Patch<T> {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// For non-nullable columns: `Null` is rejected, `Absent` means keep.
    pub fn required(self, field: &'static str) -> Result<Option<T>, NullField> {
        match self {
            Self::Absent => Ok(None),
            Self::Null => Err(NullField(field)),
            Self::Value(value) => Ok(Some(value)),
        }
    }

    /// For nullable columns: outer `None` means keep, `Some(None)` clears.
    pub fn nullable(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Null => Some(None),
            Self::Value(value) => Some(Some(value)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Edit {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        alias: Patch<String>,
        #[serde(default)]
        flag: Patch<bool>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let edit: Edit = serde_json::from_str(r#"{"name": "Flour", "alias": null}"#).unwrap();
        assert_eq!(edit.name, Patch::Value("Flour".to_string()));
        assert_eq!(edit.alias, Patch::Null);
        assert_eq!(edit.flag, Patch::Absent);
    }

    #[test]
    fn test_required_rejects_null() {
        assert_eq!(Patch::<bool>::Null.required("flag"), Err(NullField("flag")));
        assert_eq!(Patch::<bool>::Absent.required("flag"), Ok(None));
        assert_eq!(Patch::Value(true).required("flag"), Ok(Some(true)));
    }

    #[test]
    fn test_nullable_distinguishes_clear_from_keep() {
        assert_eq!(Patch::<String>::Absent.nullable(), None);
        assert_eq!(Patch::<String>::Null.nullable(), Some(None));
        assert_eq!(
            Patch::Value("x".to_string()).nullable(),
            Some(Some("x".to_string()))
        );
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(serde_json::from_str::<Edit>(r#"{"flag": "yes"}"#).is_err());
    }
}
