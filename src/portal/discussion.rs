use std::fmt;

/// Placeholder discussion board shown on a course page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionBoard {
    course_id: String,
}

impl DiscussionBoard {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
        }
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DiscussionBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Discussion Board\nDiscussions for course {} are coming soon.",
            self.course_id
        )
    }
}
