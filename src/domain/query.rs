use crate::domain::model::Category;
use std::fmt;
use std::str::FromStr;

/// Collections that answer with a bare array or a `{results: [...]}` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Articles,
    Courses,
    Tests,
    Discussions,
    Replies,
    Categories,
    Tags,
    Achievements,
    UserAchievements,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Articles,
        Resource::Courses,
        Resource::Tests,
        Resource::Discussions,
        Resource::Replies,
        Resource::Categories,
        Resource::Tags,
        Resource::Achievements,
        Resource::UserAchievements,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Articles => "/articles/",
            Resource::Courses => "/courses/",
            Resource::Tests => "/tests/",
            Resource::Discussions => "/discussions/",
            Resource::Replies => "/replies/",
            Resource::Categories => "/categories/",
            Resource::Tags => "/tags/",
            Resource::Achievements => "/achievements/",
            Resource::UserAchievements => "/user-achievements/",
        }
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("{}{}/", self.path(), id)
    }

    pub fn name(&self) -> &'static str {
        self.path().trim_matches('/')
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_matches('/').to_ascii_lowercase().replace('_', "-");
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Resource::ALL.iter().map(Resource::name).collect();
                format!("unknown resource '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// How a caller names a category when filtering a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    Id(i64),
    /// Slug or display name; resolved against the category list when the
    /// endpoint wants an id.
    Key(String),
}

impl CategoryFilter {
    pub fn resolve(&self, categories: &[Category]) -> Option<i64> {
        match self {
            CategoryFilter::Id(id) => Some(*id),
            CategoryFilter::Key(key) => categories
                .iter()
                .find(|c| c.slug == *key || c.name == *key)
                .map(|c| c.id),
        }
    }

    pub fn as_param(&self) -> String {
        match self {
            CategoryFilter::Id(id) => id.to_string(),
            CategoryFilter::Key(key) => key.clone(),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(id) => CategoryFilter::Id(id),
            Err(_) => CategoryFilter::Key(value.to_string()),
        }
    }
}

/// Query string shared by every list endpoint plus resource-specific filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<CategoryFilter>,
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = Some(category);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((key.into(), value.to_string()));
        self
    }

    /// Query pairs in a stable order. Empty search terms and a zero page are
    /// left out, as the web client did.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.as_param()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(ordering) = self.ordering.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("ordering".to_string(), ordering.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size.filter(|p| *p > 0) {
            pairs.push(("page_size".to_string(), page_size.to_string()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}
