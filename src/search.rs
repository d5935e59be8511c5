const SEARCH_BASE: &str = "https://www.youtube.com/results?search_query=";

/// Marks that `urlencoding` escapes but URI-component encoding leaves as is.
const URI_COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Video search URL for a technique, qualified by its guard or category.
pub fn technique_search_url(technique_name: &str, guard_name: &str) -> String {
    let query = format!("{technique_name} {guard_name} BJJ");
    format!("{SEARCH_BASE}{}", encode_uri_component(&query))
}

/// Percent-encodes everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
fn encode_uri_component(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    // A literal '%' is emitted as "%25", so these triplets only come from the marks.
    for (escaped, mark) in URI_COMPONENT_MARKS {
        encoded = encoded.replace(escaped, mark);
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_percent_encoded() {
        assert_eq!(
            technique_search_url("Hip Bump", "Closed Guard"),
            "https://www.youtube.com/results?search_query=Hip%20Bump%20Closed%20Guard%20BJJ"
        );
    }

    #[test]
    fn unreserved_marks_stay_literal() {
        assert_eq!(
            technique_search_url("Kimura (Trap)", "O'Brien's*!"),
            "https://www.youtube.com/results?search_query=Kimura%20(Trap)%20O'Brien's*!%20BJJ"
        );
    }

    #[test]
    fn literal_percent_is_not_decoded() {
        assert!(technique_search_url("100%21", "Guard").contains("100%2521%20Guard"));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let url = technique_search_url("Kimura & Armbar", "50/50");
        assert!(url.ends_with("Kimura%20%26%20Armbar%2050%2F50%20BJJ"));
    }
}
