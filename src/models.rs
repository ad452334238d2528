mod post;

use chrono::NaiveDate;

pub use post::{BlogPost, NewBlogPost, PostFields};

const POST_DATE_FORMAT: &str = "%B %d, %Y";

/// Formats a post date as e.g. `March 04, 2024`.
pub fn format_post_date(date: NaiveDate) -> String {
    date.format(POST_DATE_FORMAT).to_string()
}
