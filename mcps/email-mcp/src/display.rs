//! Console rendering for emails, tool traces and chat completions
//!
//! The `format_*` functions build the text; the `print_*` wrappers write it
//! to stdout.

use serde_json::Value;

use crate::types::Email;

const BANNER_WIDTH: usize = 50;
const TABLE_WIDTH: usize = 70;
const RESPONSE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;
const TRACE_RESULT_LIMIT: usize = 500;

fn rule(c: char, width: usize) -> String {
    std::iter::repeat(c).take(width).collect()
}

/// First `max` characters of `s`
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// A titled block between `=` rules
pub fn format_banner(title: &str, content: &str) -> String {
    let rule = rule('=', BANNER_WIDTH);
    format!("\n{rule}\n  {title}\n{rule}\n{content}\n{rule}\n\n")
}

/// Table of ID / From / Subject / Read
pub fn format_email_summary(emails: &[Email]) -> String {
    if emails.is_empty() {
        return "\n  No emails found.\n\n".to_string();
    }

    let rule = rule('-', TABLE_WIDTH);
    let mut out = format!(
        "\n{rule}\n  {:<5} {:<25} {:<30} {:<5}\n{rule}\n",
        "ID", "From", "Subject", "Read"
    );

    for email in emails {
        out.push_str(&format!(
            "  {:<5} {:<25} {:<30} {:<5}\n",
            email.id,
            truncate_chars(&email.sender, 23),
            truncate_chars(&email.subject, 28),
            if email.read { "Yes" } else { "No" },
        ));
    }

    out.push_str(&rule);
    out.push_str("\n\n");
    out
}

/// One tool execution: name, arguments and a truncated result
pub fn format_tool_trace(tool_name: &str, args: &Value, result: &Value) -> String {
    let result = pretty(result);
    format!(
        "\n>>> Tool: {}\n    Args: {}\n    Result: {}...\n",
        tool_name,
        pretty(args),
        truncate_chars(&result, TRACE_RESULT_LIMIT)
    )
}

/// Render an OpenAI-style chat completion, including any tool calls.
///
/// Values without a `choices` array or a top-level `message` are printed as
/// pretty JSON.
pub fn format_chat_completion(response: &Value) -> String {
    let heavy = rule('=', RESPONSE_WIDTH);
    let mut lines = vec![String::new(), heavy.clone(), "  AGENT RESPONSE".to_string(), heavy.clone()];

    let choices = response
        .get("choices")
        .and_then(Value::as_array)
        .filter(|c| !c.is_empty());

    if let Some(choices) = choices {
        for choice in choices {
            let message = &choice["message"];
            let role = message["role"].as_str().unwrap_or("assistant");
            lines.push(format!("\n[{}]", role.to_uppercase()));

            if let Some(content) = message["content"].as_str().filter(|c| !c.is_empty()) {
                lines.push(format!("\n{}", content));
            }

            if let Some(calls) = message["tool_calls"].as_array().filter(|c| !c.is_empty()) {
                let light = rule('-', SECTION_WIDTH);
                lines.push(format!("\n{}", light));
                lines.push("  TOOL CALLS".to_string());
                lines.push(light);

                for call in calls {
                    let function = &call["function"];
                    let name = function["name"].as_str().unwrap_or("unknown");
                    lines.push(format!("\n  Tool: {}", name));
                    lines.push(format!("  Args: {}", format_arguments(&function["arguments"])));
                }
            }
        }
    } else if let Some(content) = response["message"]["content"].as_str().filter(|c| !c.is_empty()) {
        lines.push(format!("\n{}", content));
    } else {
        lines.push(pretty(response));
    }

    lines.push(format!("\n{}\n", heavy));
    lines.join("\n") + "\n"
}

/// Tool-call arguments arrive as a JSON string; pretty-print them when they parse
fn format_arguments(arguments: &Value) -> String {
    match arguments {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => pretty(&parsed),
            Err(_) => raw.clone(),
        },
        Value::Null => String::new(),
        other => pretty(other),
    }
}

pub fn print_banner(title: &str, content: &str) {
    print!("{}", format_banner(title, content));
}

pub fn print_email_summary(emails: &[Email]) {
    print!("{}", format_email_summary(emails));
}

pub fn print_tool_trace(tool_name: &str, args: &Value, result: &Value) {
    print!("{}", format_tool_trace(tool_name, args, result));
}

pub fn print_chat_completion(response: &Value) {
    print!("{}", format_chat_completion(response));
}
