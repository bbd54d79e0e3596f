//! Tipos de erro para o cliente do serviço de chat.
//!
//! Define [`ApiError`] com variantes para falhas de rede, status HTTP
//! não bem-sucedido e corpo de resposta malformado. Para quem chama,
//! todas as variantes são uma falha uniforme; elas existem apenas para
//! diagnóstico nos logs.

use thiserror::Error;

/// Erros que podem ocorrer ao conversar com o serviço de perguntas e respostas.
///
/// - [`Transport`](ApiError::Transport) — falha na camada de rede
/// - [`Status`](ApiError::Status) — qualquer status fora da faixa 2xx
/// - [`MalformedBody`](ApiError::MalformedBody) — corpo sem os campos obrigatórios
#[derive(Debug, Error)]
pub enum ApiError {
    /// Falha de rede subjacente (DNS, conexão recusada, timeout de conexão).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// O serviço respondeu com um status não 2xx.
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// O corpo da resposta não pôde ser interpretado.
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        let err = ApiError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "service returned status 502: bad gateway");
    }

    #[test]
    fn malformed_body_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(json_err);
        assert!(err.to_string().starts_with("malformed response body:"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
