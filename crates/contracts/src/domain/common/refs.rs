use serde::{Deserialize, Serialize};

// ============================================================================
// Embedded references
// ============================================================================

/// Краткая ссылка на пользователя, встроенная в ответы API.
///
/// Бэкенд отдаёт имя то в `name`, то в `nombre`; оба поля опциональны.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl PersonRef {
    /// name → nombre → email → id
    pub fn display_name(&self) -> String {
        [&self.name, &self.nombre, &self.email]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
}

impl TeamRef {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.nombre.clone())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRef {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub venue_name: String,
}

// ============================================================================
// List envelope
// ============================================================================

/// Ответ списочных эндпоинтов: `{<items_key>: [...], total}`.
///
/// Имя массива у каждого ресурса своё (`users`, `teams`, `venues`, `logs`,
/// `disputes`), поэтому страница получает его через `serde(alias)` в
/// конкретном DTO, а сюда приводит результат.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_display_name_fallbacks() {
        let p: PersonRef =
            serde_json::from_str(r#"{"id":"u1","nombre":"Ana","email":"ana@x.com"}"#).unwrap();
        assert_eq!(p.display_name(), "Ana");

        let p: PersonRef = serde_json::from_str(r#"{"id":"u1","email":"ana@x.com"}"#).unwrap();
        assert_eq!(p.display_name(), "ana@x.com");

        let p = PersonRef {
            id: "u9".into(),
            name: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "u9");
    }

    #[test]
    fn test_team_display_name() {
        let t = TeamRef {
            id: "t1".into(),
            name: None,
            nombre: Some("Los Tigres".into()),
        };
        assert_eq!(t.display_name(), "Los Tigres");
    }
}
