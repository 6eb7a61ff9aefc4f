//! Line-oriented terminal front end.
//!
//! Reads questions and vote commands, drives a [`SessionHandle`] and renders
//! result cards as plain text. Input and output are generic so the loop runs
//! the same against stdin/stdout and in-memory buffers.

use crate::error::Result;
use eduranker_client::display::{self, ResultCard};
use eduranker_client::{FeedbackLabel, SearchState, SessionHandle, SubmitOutcome};
use std::fmt::Write as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const HELP: &str = "\
Type a question and press enter to search.
  :like N      toggle a like on result N
  :dislike N   toggle a dislike on result N
  :help        show this help
  :quit        exit
";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A question to search for.
    Question(String),
    /// Toggle `label` on the result rendered as number `number` (1-based).
    Vote { number: usize, label: FeedbackLabel },
    Help,
    Quit,
    /// Blank line.
    Empty,
    /// A `:` command that could not be understood.
    Invalid(String),
}

/// Parse one line of input.
///
/// Questions keep their text as typed, without the line ending.
pub fn parse_input(line: &str) -> Input {
    let raw = line.trim_end_matches(['\n', '\r']);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Question(raw.to_owned());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let label = match name {
        "like" => FeedbackLabel::Like,
        "dislike" => FeedbackLabel::Dislike,
        "help" => return Input::Help,
        "quit" | "q" => return Input::Quit,
        other => return Input::Invalid(format!("unknown command :{other}")),
    };

    match (parts.next().map(str::parse::<usize>), parts.next()) {
        (Some(Ok(number)), None) if number > 0 => Input::Vote { number, label },
        _ => Input::Invalid(format!("usage: :{label} N (N is a result number)")),
    }
}

/// Render one card as indented text. Cards are numbered from 1.
pub fn render_card(card: &ResultCard) -> String {
    let mut out = String::new();
    let vote = match card.vote {
        Some(FeedbackLabel::Like) => " [+]",
        Some(FeedbackLabel::Dislike) => " [-]",
        None => "",
    };
    let source = if card.source.is_empty() {
        card.badge.name().to_uppercase()
    } else {
        card.source.to_uppercase()
    };

    let _ = write!(
        out,
        "[{}] {:>4}  {} · {}",
        card.position + 1,
        card.score,
        source,
        card.author
    );
    if let Some(date) = &card.date {
        let _ = write!(out, " · {date}");
    }
    let _ = writeln!(out, "{vote}");
    let _ = writeln!(out, "      {}", card.title);
    if let Some(url) = &card.url {
        let _ = writeln!(out, "      {url}");
    }
    let _ = writeln!(out, "      {}", card.summary);
    if !card.keywords.is_empty() {
        let tags: Vec<String> = card.keywords.iter().map(|k| format!("#{k}")).collect();
        let _ = writeln!(out, "      {}", tags.join(" "));
    }
    out
}

/// Render the result list of `state`.
pub fn render_results(state: &SearchState) -> String {
    if !state.has_searched {
        return String::new();
    }
    if let Some(alert) = &state.alert {
        return format!("error: {alert}\n");
    }
    if state.pending {
        return "searching...\n".to_owned();
    }
    if state.results.is_empty() {
        return "No results.\n".to_owned();
    }
    display::cards(state)
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the interactive loop until EOF or `:quit`.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails. Search and
/// vote failures are printed and the loop continues.
pub async fn run<R, W>(session: &SessionHandle, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            tracing::debug!("input closed");
            break;
        }

        let output = match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Help => HELP.to_owned(),
            Input::Invalid(message) => format!("{message}\n"),
            Input::Question(question) => search(session, &question).await,
            Input::Vote { number, label } => vote(session, number, label).await,
        };
        writer.write_all(output.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

/// Run a single search and print its results.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub async fn run_once<W>(session: &SessionHandle, question: &str, mut writer: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let output = search(session, question).await;
    writer.write_all(output.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

async fn search(session: &SessionHandle, question: &str) -> String {
    match session.submit(question).await {
        Ok(SubmitOutcome::Completed(_)) | Err(_) => render_results(&session.snapshot()),
        Ok(SubmitOutcome::Ignored) | Ok(SubmitOutcome::Superseded) => String::new(),
    }
}

async fn vote(session: &SessionHandle, number: usize, label: FeedbackLabel) -> String {
    match session.toggle(number - 1, label).await {
        Ok(Some(active)) => format!("[{number}] marked {active}\n"),
        Ok(None) => format!("[{number}] vote cleared\n"),
        Err(e) => format!("error: {e}\n"),
    }
}
