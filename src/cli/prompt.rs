//! Interactive prompt.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags
//! - the prompt provides the "run `qrgen` and answer questions" UX
//!
//! Every answer has an Enter-for-default. Non-numeric size/border answers also mean
//! "use the default"; numeric answers are passed through untouched so the normalizer
//! applies the same validation policy as the flag path.

use std::io::{BufRead, Write};

use url::Url;

use crate::domain::{
    DEFAULT_BACKGROUND, DEFAULT_BORDER, DEFAULT_ERROR_CORRECTION, DEFAULT_FILL, DEFAULT_SIZE, EcTier,
    GenerationParams, GenerationRequest,
};
use crate::error::{AppError, EXIT_VALIDATION};

/// Ask for a payload and options.
///
/// `base` supplies the values that are not asked for (box size, fit mode). Returns
/// `Ok(None)` when the user declines to continue.
pub fn prompt_for_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    base: &GenerationParams,
) -> Result<Option<GenerationRequest>, AppError> {
    let mut prompt = Prompt { input, output };

    prompt.say(&"=".repeat(50))?;
    prompt.say("   QR Code Generator - Interactive Mode")?;
    prompt.say(&"=".repeat(50))?;

    let payload = loop {
        let data = prompt.ask("\nEnter the URL or text message: ")?;
        if !data.is_empty() {
            break data;
        }
        prompt.say("Input cannot be empty. Please try again.")?;
    };

    if is_http_like(&payload) && !looks_like_url(&payload) {
        prompt.say("Warning: The URL you entered might not be valid.")?;
        let proceed = prompt.ask("Do you want to proceed anyway? (y/n): ")?;
        if !proceed.eq_ignore_ascii_case("y") {
            prompt.say("Operation cancelled.")?;
            return Ok(None);
        }
    }

    prompt.say("\nCustomization Options (press Enter for defaults):")?;

    let output_name = prompt.ask("Output filename (without extension): ")?;
    let size = prompt.ask_number(
        &format!("QR code size (1-40, default: {DEFAULT_SIZE}): "),
        DEFAULT_SIZE,
        "size",
    )?;
    let border = prompt.ask_number(
        &format!("Border size (default: {DEFAULT_BORDER}): "),
        DEFAULT_BORDER,
        "border",
    )?;
    let fill_color = prompt.ask_or(&format!("Fill color (default: {DEFAULT_FILL}): "), DEFAULT_FILL)?;
    let back_color = prompt.ask_or(
        &format!("Background color (default: {DEFAULT_BACKGROUND}): "),
        DEFAULT_BACKGROUND,
    )?;

    prompt.say("Error correction levels:")?;
    for tier in EcTier::ALL {
        prompt.say(&format!(
            "{} - {} ({}% recovery)",
            tier.letter(),
            tier.display_name(),
            tier.recovery_percent()
        ))?;
    }
    let error_correction = prompt.ask_or(
        &format!("Choose error correction level (L/M/Q/H, default: {DEFAULT_ERROR_CORRECTION}): "),
        DEFAULT_ERROR_CORRECTION,
    )?;

    Ok(Some(GenerationRequest {
        payload,
        output_name: (!output_name.is_empty()).then_some(output_name),
        params: GenerationParams {
            size,
            border,
            fill_color,
            back_color,
            error_correction,
            ..base.clone()
        },
    }))
}

/// Boolean URL predicate for `http(s)://` payloads.
pub fn looks_like_url(s: &str) -> bool {
    let Ok(url) = Url::parse(s.trim()) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    match url.host() {
        Some(url::Host::Domain(domain)) => domain == "localhost" || (domain.contains('.') && !domain.ends_with('.')),
        Some(_) => true,
        None => false,
    }
}

fn is_http_like(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

struct Prompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompt<'_, R, W> {
    fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}").map_err(|e| AppError::new(EXIT_VALIDATION, format!("Failed to write prompt: {e}")))
    }

    fn ask(&mut self, question: &str) -> Result<String, AppError> {
        write!(self.output, "{question}")
            .and_then(|_| self.output.flush())
            .map_err(|e| AppError::new(EXIT_VALIDATION, format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let bytes = self
            .input
            .read_line(&mut line)
            .map_err(|e| AppError::new(EXIT_VALIDATION, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                EXIT_VALIDATION,
                "No input received. Provide the payload with `qrgen -d <text>`.",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn ask_or(&mut self, question: &str, default: &str) -> Result<String, AppError> {
        let answer = self.ask(question)?;
        Ok(if answer.is_empty() { default.to_string() } else { answer })
    }

    fn ask_number(&mut self, question: &str, default: i64, what: &str) -> Result<i64, AppError> {
        let answer = self.ask(question)?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<i64>() {
            Ok(n) => Ok(n),
            Err(_) => {
                self.say(&format!("Invalid input. Using default {what} ({default})."))?;
                Ok(default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(answers: &str) -> (Result<Option<GenerationRequest>, AppError>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_for_request(&mut input, &mut output, &GenerationParams::default());
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn enter_everywhere_gives_defaults() {
        let (result, _) = run("hello\n\n\n\n\n\n\n");
        let request = result.unwrap().unwrap();
        assert_eq!(request.payload, "hello");
        assert_eq!(request.output_name, None);
        assert_eq!(request.params, GenerationParams::default());
    }

    #[test]
    fn reasks_until_payload_given() {
        let (result, out) = run("\n  \nhttps://a.example\nticket\n5\n2\nnavy\n#fafafa\nm\n");
        let request = result.unwrap().unwrap();
        assert_eq!(out.matches("Input cannot be empty").count(), 2);
        assert_eq!(request.payload, "https://a.example");
        assert_eq!(request.output_name.as_deref(), Some("ticket"));
        assert_eq!(request.params.size, 5);
        assert_eq!(request.params.border, 2);
        assert_eq!(request.params.fill_color, "navy");
        assert_eq!(request.params.back_color, "#fafafa");
        assert_eq!(request.params.error_correction, "m");
    }

    #[test]
    fn non_numeric_numbers_fall_back_to_defaults() {
        let (result, out) = run("hi\n\nbig\nwide\n\n\n\n");
        let request = result.unwrap().unwrap();
        assert_eq!(request.params.size, 10);
        assert_eq!(request.params.border, 4);
        assert!(out.contains("Using default size (10)"));
        assert!(out.contains("Using default border (4)"));
    }

    #[test]
    fn out_of_range_numbers_are_passed_through() {
        let (result, _) = run("hi\n\n41\n-1\n\n\n\n");
        let request = result.unwrap().unwrap();
        assert_eq!(request.params.size, 41);
        assert_eq!(request.params.border, -1);
    }

    #[test]
    fn invalid_url_can_be_declined() {
        let (result, out) = run("https://not a url\nn\n");
        assert!(result.unwrap().is_none());
        assert!(out.contains("might not be valid"));
        assert!(out.contains("Operation cancelled."));
    }

    #[test]
    fn eof_is_an_error() {
        let (result, _) = run("");
        assert_eq!(result.unwrap_err().exit_code(), EXIT_VALIDATION);
    }

    #[test]
    fn url_predicate() {
        assert!(looks_like_url("https://example.com/path?q=1"));
        assert!(looks_like_url("http://localhost:8080"));
        assert!(looks_like_url("http://127.0.0.1/"));
        assert!(!looks_like_url("https://nodot"));
        assert!(!looks_like_url("https://"));
        assert!(!looks_like_url("ftp://example.com"));
    }
}
