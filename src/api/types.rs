//! Tipos de dados para requisições e respostas do serviço de perguntas e respostas.
//!
//! O corpo de [`ChatRequest`] é enviado para `POST /api/chat`; o serviço
//! responde com um [`ChatResponse`] contendo a resposta, as fontes
//! recuperadas e o identificador de sessão.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Campos de metadados que carregam URL de imagem, em ordem de prioridade.
pub const IMAGE_FIELDS: &[&str] = &[
    "interior_style_image_url",
    "architecture_type_image_url",
    "project_image_url",
    "project_thumbnail_url",
    "news_image_url",
    "news_thumbnail_url",
    "slide_image_url",
];

/// Campos de metadados que carregam um título legível, em ordem de prioridade.
pub const TITLE_FIELDS: &[&str] = &[
    "interior_style_name",
    "architecture_type_name",
    "project_name",
    "news_title",
    "slide_title",
];

/// Corpo da requisição para o endpoint `/api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Texto digitado pelo usuário, enviado sem alterações.
    pub query: String,
    /// Sessão devolvida pelo serviço numa resposta anterior.
    /// Omitido do JSON quando ausente (nunca enviado como `null`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(query: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            query: query.into(),
            session_id,
        }
    }
}

/// Resposta retornada pelo endpoint `/api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Texto da resposta gerada. Campo obrigatório.
    pub answer: String,
    /// Fontes recuperadas. Ausente ou `null` é tratado como lista vazia.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<Source>,
    /// Identificador de sessão atribuído pelo serviço.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatResponse {
    /// O identificador de sessão, se presente e não vazio.
    pub fn session(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Um trecho recuperado pelo serviço para justificar ou ilustrar a resposta.
///
/// Opaco para o cliente além da exibição.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub score: f64,
    /// Mapa aberto de metadados; os valores podem ser qualquer JSON.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Source {
    /// Valor textual não vazio de um campo de metadados.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Primeira URL de imagem reconhecida, seguindo [`IMAGE_FIELDS`].
    pub fn image_url(&self) -> Option<&str> {
        IMAGE_FIELDS.iter().find_map(|key| self.meta_str(key))
    }

    /// Primeiro título reconhecido, seguindo [`TITLE_FIELDS`].
    pub fn title(&self) -> Option<&str> {
        TITLE_FIELDS.iter().find_map(|key| self.meta_str(key))
    }

    /// Etiqueta de tipo (`metadata.type`).
    pub fn kind(&self) -> Option<&str> {
        self.meta_str("type")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Source>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Source>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_absent_session_id() {
        let req = ChatRequest::new("hello", None);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({ "query": "hello" }));
    }

    #[test]
    fn request_includes_session_id_when_present() {
        let req = ChatRequest::new("hello", Some("S1".into()));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({ "query": "hello", "session_id": "S1" }));
    }

    #[test]
    fn response_without_sources_is_empty() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"answer": "A", "session_id": "S1"}"#).unwrap();
        assert_eq!(resp.answer, "A");
        assert!(resp.sources.is_empty());
        assert_eq!(resp.session(), Some("S1"));
    }

    #[test]
    fn response_with_null_sources_is_empty() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"answer": "A", "sources": null, "session_id": "S1"}"#)
                .unwrap();
        assert!(resp.sources.is_empty());
    }

    #[test]
    fn response_missing_answer_is_rejected() {
        let err = serde_json::from_str::<ChatResponse>(r#"{"session_id": "S1"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn empty_session_id_is_not_a_session() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"answer": "A", "session_id": ""}"#).unwrap();
        assert_eq!(resp.session(), None);
    }

    #[test]
    fn source_deserialize_from_service_format() {
        let api_json = r#"{
            "text": "Modern villa in Da Nang",
            "score": 0.87,
            "metadata": {
                "type": "project",
                "project_name": "Villa DN",
                "project_image_url": "https://cdn.example.com/villa.jpg",
                "year": 2021
            }
        }"#;
        let source: Source = serde_json::from_str(api_json).unwrap();
        assert_eq!(source.kind(), Some("project"));
        assert_eq!(source.title(), Some("Villa DN"));
        assert_eq!(source.image_url(), Some("https://cdn.example.com/villa.jpg"));
        assert!((source.score - 0.87).abs() < f64::EPSILON);
    }

    #[test]
    fn image_url_follows_field_priority() {
        let source: Source = serde_json::from_value(json!({
            "text": "t",
            "score": 1.0,
            "metadata": {
                "project_thumbnail_url": "thumb.jpg",
                "project_image_url": "full.jpg"
            }
        }))
        .unwrap();
        assert_eq!(source.image_url(), Some("full.jpg"));
    }

    #[test]
    fn unrecognized_or_blank_image_fields_are_ignored() {
        let source: Source = serde_json::from_value(json!({
            "text": "t",
            "score": 0.5,
            "metadata": {
                "image": "https://example.com/a.png",
                "news_image_url": "",
                "slide_image_url": null
            }
        }))
        .unwrap();
        assert_eq!(source.image_url(), None);
    }
}
