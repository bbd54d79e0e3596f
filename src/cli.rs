//! Interface de linha de comando do ragchat baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (chat, ask, health)
//! e flags globais (--api-url, --verbose).

use clap::{Parser, Subcommand};

/// ragchat — cliente de terminal para o serviço de perguntas e respostas.
#[derive(Debug, Parser)]
#[command(name = "ragchat", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// URL base do serviço (sobrescreve `RAGCHAT_API_URL` e `ragchat.toml`).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inicia uma conversa interativa.
    Chat,

    /// Faz uma única pergunta e imprime a resposta.
    Ask {
        /// Texto da pergunta.
        query: String,
    },

    /// Verifica se o serviço está disponível.
    Health,
}
