use std::fmt::Write;

pub fn render(input: &str, error: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Recall Previous Scan");
    let _ = writeln!(out, "Enter the 3-digit identifier provided during your scan.");
    let _ = writeln!(out, "  (type the identifier, or 'cancel')");
    let _ = writeln!(out);
    let _ = writeln!(out, "Identifier: #{input}");
    if let Some(error) = error {
        let _ = writeln!(out, "  {error}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_field_error_under_input() {
        let text = render("123", Some("Scan identifier not found."));
        assert!(text.contains("#123"));
        assert!(text.ends_with("  Scan identifier not found.\n"));
        assert!(!render("", None).contains("not found"));
    }
}
