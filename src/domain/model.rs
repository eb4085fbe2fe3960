use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Untyped list item exactly as the backend sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub data: HashMap<String, Value>,
}

impl Record {
    pub fn id(&self) -> Option<i64> {
        self.data.get("id").and_then(Value::as_i64)
    }

    pub fn field(&self, name: &str) -> PolymorphicField {
        self.data
            .get(name)
            .map(PolymorphicField::from_value)
            .unwrap_or(PolymorphicField::Absent)
    }

    /// Display string for an attribute, coerced from whatever shape it has.
    pub fn display(&self, name: &str) -> String {
        self.field(name).display_name()
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    fn try_from(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Record {
                data: map.into_iter().collect(),
            }),
            other => Err(other),
        }
    }
}

/// A category, tag or author reference. The backend sends any of these
/// shapes for the same attribute depending on which serializer produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum PolymorphicField {
    #[default]
    Absent,
    Id(serde_json::Number),
    Label(String),
    Named {
        name: String,
        id: Option<i64>,
        slug: Option<String>,
    },
}

impl PolymorphicField {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => PolymorphicField::Absent,
            Value::Number(n) => PolymorphicField::Id(n.clone()),
            Value::String(s) => PolymorphicField::Label(s.clone()),
            Value::Object(map) => PolymorphicField::Named {
                name: match map.get("name") {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                },
                id: map.get("id").and_then(Value::as_i64),
                slug: map.get("slug").and_then(Value::as_str).map(str::to_string),
            },
            other => PolymorphicField::Label(other.to_string()),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            PolymorphicField::Absent => String::new(),
            PolymorphicField::Id(n) => n.to_string(),
            PolymorphicField::Label(s) => s.clone(),
            PolymorphicField::Named { name, .. } => name.clone(),
        }
    }

    /// Key used when this value is turned back into a listing filter.
    pub fn slug_or_name(&self) -> String {
        match self {
            PolymorphicField::Named {
                slug: Some(slug), ..
            } if !slug.is_empty() => slug.clone(),
            other => other.display_name(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            PolymorphicField::Id(n) => n.as_i64(),
            PolymorphicField::Named { id, .. } => *id,
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, PolymorphicField::Absent)
    }
}

impl From<Value> for PolymorphicField {
    fn from(value: Value) -> Self {
        PolymorphicField::from_value(&value)
    }
}

impl From<PolymorphicField> for Value {
    fn from(field: PolymorphicField) -> Self {
        match field {
            PolymorphicField::Absent => Value::Null,
            PolymorphicField::Id(n) => Value::Number(n),
            PolymorphicField::Label(s) => Value::String(s),
            PolymorphicField::Named { name, id, slug } => {
                let mut map = serde_json::Map::new();
                if let Some(id) = id {
                    map.insert("id".to_string(), Value::from(id));
                }
                map.insert("name".to_string(), Value::String(name));
                if let Some(slug) = slug {
                    map.insert("slug".to_string(), Value::String(slug));
                }
                Value::Object(map)
            }
        }
    }
}

/// Decimal fields arrive as JSON strings (`"4.5"`) from some serializers.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

/// Durations come either as seconds or as Django's `[D ]HH:MM:SS[.ffffff]`.
fn lenient_seconds<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => parse_duration_seconds(&s).unwrap_or_default(),
        _ => 0.0,
    })
}

pub fn parse_duration_seconds(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(seconds) = text.parse::<f64>() {
        return Some(seconds);
    }

    let (days, clock) = match text.split_once(' ') {
        Some((days, clock)) => (days.trim().parse::<f64>().ok()?, clock.trim()),
        None => (0.0, text),
    };
    let parts: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (h.parse::<f64>().ok()?, m.parse::<f64>().ok()?, s.parse::<f64>().ok()?),
        [m, s] => (0.0, m.parse::<f64>().ok()?, s.parse::<f64>().ok()?),
        _ => return None,
    };
    Some(days * 86_400.0 + hours * 3_600.0 + minutes * 60.0 + seconds)
}

/// Array items that decode are kept; anything else (`{}`, null, scalars) is empty.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Pagination envelope as returned by the paginated list endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub date_joined: Option<String>,
    pub image: Option<String>,
    pub courses_completed: Option<u32>,
    pub tests_completed: Option<u32>,
    pub articles_read: Option<u32>,
    pub average_score: Option<f64>,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Registration creates the account only; tokens come from a later login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterResponse {
    pub user: Option<User>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub subcategories: Vec<Category>,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievement {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAchievement {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: PolymorphicField,
    pub author: PolymorphicField,
    pub featured: bool,
    pub tags: Vec<PolymorphicField>,
    pub views: u64,
    pub likes: u64,
    pub date: Option<String>,
    pub image: Option<String>,
    pub read_time: Option<u32>,
    pub comments_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub category: PolymorphicField,
    pub level: PolymorphicField,
    pub duration: PolymorphicField,
    pub students: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: f64,
    pub featured: bool,
    pub tags: Vec<PolymorphicField>,
    pub instructor: PolymorphicField,
    pub certificate: bool,
    pub last_updated: Option<String>,
    pub image: Option<String>,
    pub language: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Test {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub category: PolymorphicField,
    pub level: PolymorphicField,
    pub duration: PolymorphicField,
    pub questions_count: u32,
    pub participants: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: f64,
    pub featured: bool,
    pub tags: Vec<PolymorphicField>,
    pub passing_score: u32,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestQuestion {
    pub id: i64,
    pub test: i64,
    pub question_text: String,
    pub options: Vec<String>,
    pub order: u32,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: i64,
    pub selected_option: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestAnswer {
    pub question_id: i64,
    pub selected_option: String,
    pub is_correct: bool,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
}

/// Stored result. `attempt` is the nested attempt object (or its id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResult {
    pub id: i64,
    pub test: PolymorphicField,
    pub user: PolymorphicField,
    pub attempt: PolymorphicField,
    pub total_questions: u32,
    pub correct_answers: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub score_percent: f64,
    pub passed: bool,
    /// Seconds.
    #[serde(deserialize_with = "lenient_seconds")]
    pub time_spent: f64,
    pub feedback: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub detailed_results: Vec<TestAnswer>,
    pub created_at: Option<String>,
}

/// Reply to a submitted answer sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestSubmission {
    pub id: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub score: f64,
    pub passed: bool,
    #[serde(deserialize_with = "lenient_list")]
    pub answers: Vec<TestAnswer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Discussion {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: PolymorphicField,
    pub author: PolymorphicField,
    pub tags: Vec<PolymorphicField>,
    pub pinned: bool,
    pub solved: bool,
    pub views: u64,
    pub likes: u64,
    pub replies: u64,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reply {
    pub id: i64,
    pub discussion: i64,
    pub user: PolymorphicField,
    pub content: String,
    pub likes: u64,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSection {
    pub id: i64,
    pub course: i64,
    pub title: String,
    pub order: u32,
    pub lessons: Vec<Record>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseMaterial {
    pub id: i64,
    pub course: i64,
    pub title: String,
    pub file: String,
    pub r#type: String,
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseReview {
    pub id: i64,
    pub course: i64,
    pub user: PolymorphicField,
    pub rating: u8,
    pub date: Option<String>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseProgress {
    pub course_id: i64,
    pub completed_lessons: u32,
    pub total_lessons: u32,
    pub progress_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub articles: Vec<Article>,
    pub courses: Vec<Course>,
    pub discussions: Vec<Discussion>,
    pub tests: Vec<Test>,
}
