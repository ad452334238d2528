#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub body: String,
    pub author: String,
    pub img_url: String,
}

impl BlogPost {
    /// The stored body markup with scripts and event handlers stripped.
    pub fn safe_body(&self) -> String {
        ammonia::clean(&self.body)
    }
}

/// Validated form values. The date is stamped separately at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub img_url: String,
    pub body: String,
}

impl PostFields {
    pub fn with_date(self, date: String) -> NewBlogPost {
        NewBlogPost {
            title: self.title,
            subtitle: self.subtitle,
            date,
            body: self.body,
            author: self.author,
            img_url: self.img_url,
        }
    }
}

/// Every column of a post except `id`, as written by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub body: String,
    pub author: String,
    pub img_url: String,
}
