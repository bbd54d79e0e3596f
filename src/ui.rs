//! Interface de terminal do ragchat — spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner enquanto uma pergunta está
//! pendente e `console` para estilização com cores. As funções de
//! renderização devolvem `String` para que a view decida onde escrever.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::Source;
use crate::conversation::{Message, Role};

/// Estilos usados na transcrição.
pub struct Palette {
    // Rótulo das mensagens do usuário.
    user: Style,
    // Rótulo das mensagens do assistente.
    assistant: Style,
    // Blocos de imagem das fontes.
    image: Style,
    // Texto secundário (citações, dicas).
    dim: Style,
    // Avisos ao usuário.
    warn: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            user: Style::new().cyan().bold(),
            assistant: Style::new().magenta().bold(),
            image: Style::new().green(),
            dim: Style::new().dim(),
            warn: Style::new().yellow(),
        }
    }
}

impl Palette {
    /// Mensagem de boas-vindas exibida quando a transcrição está vazia.
    pub fn greeting(&self) -> String {
        format!(
            "{}\n{}",
            self.assistant.apply_to("Hello! How can I help you?"),
            self.dim
                .apply_to("Ask about projects, architecture, interiors or news. Type `exit` to quit.")
        )
    }

    /// Aviso mostrado quando o serviço não responde ao health check.
    pub fn service_down(&self, base_url: &str) -> String {
        format!(
            "{} service at {base_url} is not reachable; answers may fail",
            self.warn.apply_to("!")
        )
    }

    /// Renderiza uma mensagem completa, incluindo suas fontes.
    ///
    /// O conteúdo é exibido literalmente, sem reformatação.
    pub fn render_message(&self, message: &Message) -> String {
        let label = match message.role {
            Role::User => self.user.apply_to("You ›"),
            Role::Assistant => self.assistant.apply_to("Bot ›"),
        };
        let mut out = format!("{label} {}", message.content);
        for source in &message.sources {
            out.push('\n');
            out.push_str(&self.render_source(source));
        }
        out
    }

    /// Fontes com URL de imagem reconhecida viram um bloco de imagem;
    /// as demais viram uma citação de uma linha.
    fn render_source(&self, source: &Source) -> String {
        let label = source.title().or_else(|| source.kind());
        match source.image_url() {
            Some(url) => format!(
                "  {} {}\n    {url}",
                self.image.apply_to("▣"),
                label.unwrap_or("image")
            ),
            None => format!(
                "  {}",
                self.dim.apply_to(format!(
                    "· {} ({:.2})",
                    label.unwrap_or("source"),
                    source.score
                ))
            ),
        }
    }
}

/// Spinner exibido enquanto uma pergunta aguarda resposta.
pub struct TurnProgress {
    // Spinner do indicatif.
    pb: ProgressBar,
}

impl TurnProgress {
    /// Inicia o spinner.
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.magenta} {msg}")
                .expect("invalid template"),
        );
        pb.set_message("thinking…");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    /// Remove o spinner da tela.
    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}
