//! REPL - login screen and conversational loop.
//!
//! Both halves are generic over their input and output streams so tests can
//! drive them with in-memory buffers.

use crate::display::Palette;
use anyhow::{Context, Result};
use civic_common::messages::{self, LOGIN_PROMPT, WELCOME_BANNER};
use civic_common::{login, Citizen, CitizenDirectory, Matcher, Session, Transcript};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Read one line, replacing invalid UTF-8; `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let n = input
        .read_until(b'\n', &mut buf)
        .context("Failed to read input")?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Prompt for a citizen ID until one is accepted.
///
/// Returns `None` if input ends first.
pub fn prompt_login<R, W, D>(
    input: &mut R,
    out: &mut W,
    directory: &D,
    palette: &Palette,
) -> Result<Option<Citizen>>
where
    R: BufRead,
    W: Write,
    D: CitizenDirectory + ?Sized,
{
    writeln!(out, "{}", palette.banner(WELCOME_BANNER))?;

    loop {
        write!(out, "{}: ", LOGIN_PROMPT)?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            debug!("input closed at login");
            return Ok(None);
        };

        match login(&line, directory) {
            Ok(citizen) => {
                info!(id = citizen.id, "citizen logged in");
                return Ok(Some(citizen));
            }
            Err(e) => writeln!(out, "{}", palette.error(&e.to_string()))?,
        }
    }
}

/// Converse until `exit` or end of input, returning the transcript
pub fn run_chat<R, W>(
    input: &mut R,
    out: &mut W,
    citizen: Citizen,
    matcher: &Matcher,
    palette: &Palette,
) -> Result<Transcript>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", messages::chat_greeting(&citizen.name))?;
    let mut session = Session::new(citizen, matcher);

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            break;
        };

        let reply = session.handle(&line);
        if let Some(rendered) = palette.reply(&reply) {
            writeln!(out, "{}", rendered)?;
        }
        if reply.ends_session() {
            break;
        }
    }

    debug!(lines = session.transcript().len(), "chat finished");
    Ok(session.transcript().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_common::InMemoryDirectory;
    use std::io::Cursor;

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::from_records(vec![(5, "Kavya")]).unwrap()
    }

    #[test]
    fn test_login_retries_until_valid() {
        let mut input = Cursor::new("abc\n99\n5\n");
        let mut out = Vec::new();

        let citizen = prompt_login(&mut input, &mut out, &directory(), &Palette::plain())
            .unwrap()
            .unwrap();
        assert_eq!(citizen.name, "Kavya");

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Welcome to the City Chatbot"));
        assert!(text.contains("Invalid input. Enter a number."));
        assert!(text.contains("Invalid ID. Try again."));
    }

    #[test]
    fn test_login_eof() {
        let mut input = Cursor::new("xyz\n");
        let mut out = Vec::new();
        let result = prompt_login(&mut input, &mut out, &directory(), &Palette::plain()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_chat_until_exit() {
        let mut input = Cursor::new("watr\nyes\nexit\nparking\n");
        let mut out = Vec::new();
        let citizen = Citizen {
            id: 5,
            name: "Kavya".to_string(),
        };

        let transcript = run_chat(
            &mut input,
            &mut out,
            citizen,
            &Matcher::default(),
            &Palette::plain(),
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Hello Kavya, ask your question below:"));
        assert!(text.contains("Bot: Did you mean 'water'? (yes/no)"));
        assert!(text.contains("Bot: Water supply is available daily."));
        assert!(text.contains("Bot: Thank you, Kavya, for using the chatbot."));
        // nothing after exit is processed
        assert!(!text.contains("Parking permits"));
        assert_eq!(transcript.len(), 6);
    }

    #[test]
    fn test_chat_survives_invalid_utf8() {
        let mut input = Cursor::new(b"\xff\xfe\nwatr\nyes\nexit\n".to_vec());
        let mut out = Vec::new();
        let citizen = Citizen {
            id: 5,
            name: "Kavya".to_string(),
        };

        let transcript = run_chat(
            &mut input,
            &mut out,
            citizen,
            &Matcher::default(),
            &Palette::plain(),
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Bot: Hello Kavya, I couldn't find information about your question."));
        assert!(text.contains("Bot: Water supply is available daily."));
        assert!(text.contains("Bot: Thank you, Kavya, for using the chatbot."));
        assert_eq!(transcript.len(), 8);
    }

    #[test]
    fn test_chat_skips_blank_lines() {
        let mut input = Cursor::new("\n\n");
        let mut out = Vec::new();
        let citizen = Citizen {
            id: 5,
            name: "Kavya".to_string(),
        };
        let transcript = run_chat(
            &mut input,
            &mut out,
            citizen,
            &Matcher::default(),
            &Palette::plain(),
        )
        .unwrap();
        assert!(transcript.is_empty());
    }
}
