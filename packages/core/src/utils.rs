// ABOUTME: Shared utility functions for Scrumline
// ABOUTME: Row id generation

/// Generate a unique row id.
pub fn generate_id() -> String {
    nanoid::nanoid!()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id1 = generate_id();
        let id2 = generate_id();

        assert_eq!(id1.len(), 21);
        assert_ne!(id1, id2);
    }
}
