//! Configuração do ragchat carregada a partir de `ragchat.toml`.
//!
//! A struct [`ChatConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `RAGCHAT_API_URL` tem precedência sobre o arquivo,
//! e a flag `--api-url` tem precedência sobre ambos.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::api::DEFAULT_API_URL;
use crate::conversation::DEFAULT_FALLBACK_MESSAGE;
use crate::error::AppError;

pub const CONFIG_FILE: &str = "ragchat.toml";
pub const API_URL_ENV: &str = "RAGCHAT_API_URL";

/// Configuração de nível superior carregada de `ragchat.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// URL base do serviço de perguntas e respostas.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Timeout da fase de conexão, em segundos.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Mensagem fixa exibida ao usuário quando uma pergunta falha.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

// Valor padrão para a URL base: servidor local de desenvolvimento.
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

// Valor padrão para o timeout de conexão: 10s.
fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            fallback_message: default_fallback_message(),
        }
    }
}

impl ChatConfig {
    /// Carrega a configuração de `ragchat.toml` no diretório atual e aplica
    /// a variável de ambiente. Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self, AppError> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Ok(Self::load_from(Path::new(CONFIG_FILE))?.with_api_url(env_url.as_deref()))
    }

    /// Carrega a configuração de um arquivo específico, sem olhar o ambiente.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str::<ChatConfig>(&contents)?)
    }

    /// Sobrescreve a URL base se o valor for não vazio.
    pub fn with_api_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim)
            && !url.is_empty()
        {
            self.api_url = url.to_string();
        }
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
