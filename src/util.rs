pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description provided.";

pub fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        UNTITLED
    } else {
        name
    }
}

pub fn display_description(description: &str) -> &str {
    if description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_falls_back() {
        assert_eq!(display_name(""), "Untitled");
        assert_eq!(display_name("  "), "Untitled");
        assert_eq!(display_name("RLHF"), "RLHF");
        assert_eq!(display_description(""), "No description provided.");
        assert_eq!(display_description("text"), "text");
    }
}
