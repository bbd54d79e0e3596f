//! Conversation view: drives a [`Conversation`] from user input lines and
//! the single in-flight request, and renders the transcript.

use std::io::{self, BufRead, Write};

use futures::FutureExt;
use futures::future::{LocalBoxFuture, OptionFuture};
use tokio::sync::mpsc;

use crate::api::{ApiError, ChatRequest, ChatResponse, ChatSender};
use crate::conversation::{Conversation, Ignored, Submission};
use crate::ui::{Palette, TurnProgress};

/// Owns the conversation state and the output it is rendered to.
pub struct ConversationView<W: Write> {
    conversation: Conversation,
    out: W,
    palette: Palette,
    // Number of transcript messages already written to `out`.
    rendered: usize,
    spinner: bool,
    progress: Option<TurnProgress>,
}

impl<W: Write> ConversationView<W> {
    pub fn new(conversation: Conversation, out: W) -> Self {
        Self {
            conversation,
            out,
            palette: Palette::default(),
            rendered: 0,
            spinner: false,
            progress: None,
        }
    }

    /// Show a spinner while a request is pending (interactive terminals only).
    pub fn with_spinner(mut self, enabled: bool) -> Self {
        self.spinner = enabled;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn greet(&mut self) -> io::Result<()> {
        if self.conversation.messages().is_empty() {
            writeln!(self.out, "{}", self.palette.greeting())?;
        }
        self.out.flush()
    }

    pub fn warn_service_down(&mut self, base_url: &str) -> io::Result<()> {
        writeln!(self.out, "{}", self.palette.service_down(base_url))?;
        self.out.flush()
    }

    /// Offer one line of input. Returns the request to send when a turn starts.
    pub fn submit(&mut self, input: &str) -> io::Result<Option<ChatRequest>> {
        match self.conversation.submit(input) {
            Submission::Accepted(req) => {
                self.reveal_latest()?;
                if self.spinner {
                    self.progress = Some(TurnProgress::start());
                }
                Ok(Some(req))
            }
            Submission::Ignored(Ignored::Empty) => {
                tracing::debug!("ignoring empty input");
                Ok(None)
            }
            Submission::Ignored(Ignored::Busy) => {
                tracing::debug!(phase = %self.conversation.phase(), "ignoring input while a request is pending");
                Ok(None)
            }
        }
    }

    /// Apply the outcome of the in-flight request.
    pub fn settle(&mut self, outcome: Result<ChatResponse, ApiError>) -> io::Result<()> {
        if let Some(progress) = self.progress.take() {
            progress.finish();
        }
        self.conversation.settle(outcome);
        tracing::debug!(session_id = ?self.conversation.session_id(), "turn settled");
        self.reveal_latest()
    }

    // Writes every message appended since the last call so the newest one
    // is always the last thing on screen.
    fn reveal_latest(&mut self) -> io::Result<()> {
        let pending = &self.conversation.messages()[self.rendered..];
        for message in pending {
            writeln!(self.out, "{}", self.palette.render_message(message))?;
        }
        self.rendered += pending.len();
        self.out.flush()
    }
}

/// Run an interactive session until `exit`/`quit` or end of input.
///
/// Input arriving while a request is pending is dropped, not queued. On
/// shutdown the in-flight turn is allowed to settle first.
pub async fn run<S, W>(
    client: &S,
    view: &mut ConversationView<W>,
    mut lines: mpsc::Receiver<String>,
) -> io::Result<()>
where
    S: ChatSender,
    W: Write,
{
    let mut in_flight: OptionFuture<LocalBoxFuture<'_, Result<ChatResponse, ApiError>>> =
        None.into();
    let mut closed = false;

    loop {
        if closed && !view.conversation().is_pending() {
            break;
        }

        tokio::select! {
            biased;

            Some(outcome) = &mut in_flight => {
                in_flight = None.into();
                view.settle(outcome)?;
            }
            line = lines.recv(), if !closed => match line {
                Some(line) if is_exit_command(&line) => closed = true,
                Some(line) => {
                    if let Some(req) = view.submit(&line)? {
                        in_flight = Some(async move { client.send_message(&req).await }.boxed_local()).into();
                    }
                }
                None => closed = true,
            },
            else => break,
        }
    }

    Ok(())
}

/// Run exactly one turn. Returns `false` if the query was blank.
pub async fn ask<S, W>(client: &S, view: &mut ConversationView<W>, query: &str) -> io::Result<bool>
where
    S: ChatSender,
    W: Write,
{
    let Some(req) = view.submit(query)? else {
        return Ok(false);
    };
    let outcome = client.send_message(&req).await;
    view.settle(outcome)?;
    Ok(true)
}

/// Lines typed on stdin, read on a dedicated thread.
pub fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to read input: {e}");
                    break;
                }
            }
        }
    });
    rx
}

fn is_exit_command(line: &str) -> bool {
    let word = line.trim();
    word.eq_ignore_ascii_case("exit") || word.eq_ignore_ascii_case("quit")
}
