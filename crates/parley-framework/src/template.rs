//! Positional template substitution for error replies.

/// Substitutes positional placeholders (`{0}`, `{1}`, …) in a template.
///
/// Every occurrence of a placeholder is replaced; placeholders without a
/// matching argument are left untouched.
pub fn format_template(template: &str, args: &[String]) -> String {
    args.iter().enumerate().fold(
        template.to_string(),
        |acc, (i, arg)| acc.replace(&format!("{{{i}}}"), arg),
    )
}
