/// Pulls an `endcard_id` out of a pasted edit link, e.g.
/// `https://endcard.example.com/?endcard_id=42`. A bare id passes through
/// unchanged so users can paste the id itself.
pub fn extract_endcard_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(start_idx) = input.find("endcard_id=") {
        let start = start_idx + "endcard_id=".len();
        let remaining = &input[start..];
        let end = remaining
            .find(|c| c == '&' || c == '#')
            .unwrap_or(remaining.len());
        let id = &remaining[..end];
        if id.is_empty() {
            return None;
        }
        return Some(id.to_string());
    }

    // Anything URL-shaped without the parameter is not an id.
    if input.contains('/') || input.contains('?') || input.contains('=') {
        return None;
    }

    Some(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_query_parameter() {
        let id = extract_endcard_id("https://endcard.example.com/?endcard_id=42");
        assert_eq!(id.as_deref(), Some("42"));
    }

    #[test]
    fn stops_at_following_parameters() {
        let id = extract_endcard_id("https://x.test/edit?endcard_id=abc-7&utm_source=mail");
        assert_eq!(id.as_deref(), Some("abc-7"));
    }

    #[test]
    fn accepts_a_bare_id() {
        assert_eq!(extract_endcard_id("  91  ").as_deref(), Some("91"));
    }

    #[test]
    fn rejects_links_without_the_parameter() {
        assert_eq!(extract_endcard_id("https://endcard.example.com/pricing"), None);
        assert_eq!(extract_endcard_id("endcard_id="), None);
        assert_eq!(extract_endcard_id(""), None);
    }
}
