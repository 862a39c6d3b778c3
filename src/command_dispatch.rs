//! Purpose: Hold top-level CLI command dispatch for `formcodec`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: stdout carries only the command payload; notices and errors go to stderr.
//! Invariants: Non-strict decoding never fails on bad sections; strict decoding does.

use super::*;
use formcodec::api::{
    CollectingReporter, Document, QuestionTypes, decode_with, encode, encode_pretty, try_decode,
};

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "formcodec", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Decode {
            input,
            strict,
            compact,
        } => {
            let document = load_document("decode", input.as_deref(), strict, color_mode)?;
            let value = serde_json::to_value(&document).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to render document")
                    .with_source(err)
            })?;
            emit_json(&value, !compact)?;
            Ok(RunOutcome::ok())
        }
        Command::Encode { input, pretty } => {
            let (text, source) = read_input(input.as_deref())?;
            let document: Document = serde_json::from_str(&text).map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!("{source} is not editor JSON"))
                    .with_hint("Expected {\"sections\":[...]} as printed by `formcodec decode`.")
                    .with_source(err)
            })?;
            emit_encoded(&document, pretty);
            Ok(RunOutcome::ok())
        }
        Command::Normalize {
            input,
            strict,
            pretty,
        } => {
            let document = load_document("normalize", input.as_deref(), strict, color_mode)?;
            emit_encoded(&document, pretty);
            Ok(RunOutcome::ok())
        }
        Command::New { pretty } => {
            emit_encoded(&Document::skeleton(), pretty);
            Ok(RunOutcome::ok())
        }
        Command::Types { file } => {
            let types = match file {
                Some(path) => QuestionTypes::load(&path)?,
                None => QuestionTypes::default(),
            };
            let values = types
                .iter()
                .map(|t| json!({ "value": t.value, "label": t.label, "uses_options": t.uses_options() }))
                .collect::<Vec<_>>();
            emit_json(&json!({ "types": values }), true)?;
            Ok(RunOutcome::ok())
        }
    }
}

fn load_document(
    cmd: &str,
    input: Option<&Path>,
    strict: bool,
    color_mode: ColorMode,
) -> Result<Document, Error> {
    let (text, source) = read_input(input)?;
    if strict {
        return try_decode(&text).map_err(|err| {
            err.with_hint("Drop --strict to get an editable fallback document instead.")
        });
    }

    let reporter = CollectingReporter::new();
    let document = decode_with(&text, &reporter);
    for failure in reporter.take() {
        let notice = Notice::decode_fallback(cmd, source.as_str(), notice_time_now(), &failure);
        emit_notice(&notice, color_mode);
    }
    Ok(document)
}

fn emit_encoded(document: &Document, pretty: bool) {
    if pretty {
        println!("{}", encode_pretty(document));
    } else {
        println!("{}", encode(document));
    }
}
