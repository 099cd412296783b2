//! Subcommand implementations

use crate::cli::Cli;
use crate::display::Palette;
use crate::repl;
use anyhow::{Context, Result};
use civic_common::{login, Citizen, CivicConfig, CsvCitizenStore, Matcher, Reply, Session};
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

/// Effective configuration: file/env layers plus command-line overrides
pub fn load_config(cli: &Cli) -> Result<CivicConfig> {
    let mut config =
        CivicConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(path) = &cli.citizens {
        config.data.citizens = path.clone();
    }
    if let Some(path) = &cli.faq {
        config.data.faq = Some(path.clone());
    }

    debug!(?config, "effective configuration");
    Ok(config)
}

fn load_matcher(config: &CivicConfig) -> Result<Matcher> {
    config.matcher().context("Failed to load FAQ table")
}

fn load_citizens(config: &CivicConfig) -> Result<CsvCitizenStore> {
    config.citizens().with_context(|| {
        format!(
            "Failed to load citizen records from {}",
            config.data.citizens.display()
        )
    })
}

/// Interactive login and chat on stdin/stdout
pub fn chat(config: &CivicConfig, id: Option<&str>) -> Result<()> {
    let matcher = load_matcher(config)?;
    let citizens = load_citizens(config)?;
    let palette = Palette::new(config.output.color);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let citizen = match id {
        Some(raw) => login(raw, &citizens)?,
        None => match repl::prompt_login(&mut input, &mut out, &citizens, &palette)? {
            Some(citizen) => citizen,
            None => return Ok(()),
        },
    };

    repl::run_chat(&mut input, &mut out, citizen, &matcher, &palette)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct AskOutput<'a> {
    citizen: &'a Citizen,
    question: &'a str,
    reply: &'a Reply,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending_topic: Option<&'a str>,
}

/// One question in a fresh session
pub fn ask<W: Write>(
    config: &CivicConfig,
    id: &str,
    question: &[String],
    json: bool,
    out: &mut W,
) -> Result<()> {
    let matcher = load_matcher(config)?;
    let citizens = load_citizens(config)?;
    let citizen = login(id, &citizens)?;

    let question = question.join(" ");
    let mut session = Session::new(citizen.clone(), &matcher);
    let reply = session.handle(&question);

    if json {
        let output = AskOutput {
            citizen: &citizen,
            question: &question,
            reply: &reply,
            pending_topic: session.pending_topic(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else if let Some(line) = Palette::new(config.output.color).reply(&reply) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// List topics of the active table
pub fn topics<W: Write>(config: &CivicConfig, out: &mut W) -> Result<()> {
    let matcher = load_matcher(config)?;
    let width = matcher
        .table()
        .keywords()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0);

    for topic in matcher.table().iter() {
        writeln!(out, "{:<width$}  {}", topic.keyword, topic.answer, width = width)?;
    }
    Ok(())
}

pub fn show_config<W: Write>(config: &CivicConfig, out: &mut W) -> Result<()> {
    write!(out, "{}", config.to_toml()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_with_citizens(dir: &tempfile::TempDir) -> CivicConfig {
        let csv = dir.path().join("citizen.csv");
        fs::write(&csv, "citizen_id,name\n12,Nisha\n").unwrap();
        let mut config = CivicConfig::default();
        config.data.citizens = csv;
        config.output.color = civic_common::config::ColorMode::Never;
        config
    }

    #[test]
    fn test_ask_plain() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_citizens(&dir);
        let mut out = Vec::new();

        ask(&config, "12", &["fire".into(), "safety".into()], false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Bot: Did you mean 'fires'? (yes/no)\n");
    }

    #[test]
    fn test_ask_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_citizens(&dir);
        let mut out = Vec::new();

        ask(&config, "12", &["police".into()], true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["reply"]["kind"], "answer");
        assert_eq!(value["reply"]["keyword"], "police");
        assert_eq!(value["citizen"]["name"], "Nisha");
        assert!(value.get("pending_topic").is_none());
    }

    #[test]
    fn test_ask_unknown_citizen() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_citizens(&dir);
        let mut out = Vec::new();

        let err = ask(&config, "13", &["water".into()], false, &mut out).unwrap_err();
        assert_eq!(crate::errors::exit_code_for(&err), crate::errors::EXIT_LOGIN_FAILED);
    }

    #[test]
    fn test_topics_lists_builtin() {
        let mut out = Vec::new();
        topics(&CivicConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 13);
        assert!(text.lines().next().unwrap().starts_with("garbage "));
    }
}
