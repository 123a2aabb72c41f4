use std::time::SystemTime;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio_postgres::{types::ToSql, Row};

use super::SearchParams;

pub const POST_COLUMNS: &str =
    "id, title, content, writer, view_cnt, notice_yn, delete_yn, created_date, modified_date";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub writer: String,
    pub view_cnt: i32,
    pub notice_yn: bool,
    pub delete_yn: bool,
    pub created_date: u64,
    pub modified_date: Option<u64>,
}

fn unix_seconds(time: SystemTime) -> Result<u64> {
    Ok(time.duration_since(SystemTime::UNIX_EPOCH)?.as_secs())
}

impl TryFrom<&Row> for Post {
    type Error = anyhow::Error;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            writer: row.try_get("writer")?,
            view_cnt: row.try_get("view_cnt")?,
            notice_yn: row.try_get("notice_yn")?,
            delete_yn: row.try_get("delete_yn")?,
            created_date: unix_seconds(row.try_get("created_date")?)?,
            modified_date: row
                .try_get::<_, Option<SystemTime>>("modified_date")?
                .map(unix_seconds)
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Title,
    Content,
    Writer,
    All,
}

impl SearchType {
    /// Unknown or missing types search every column.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("title") => Self::Title,
            Some(t) if t.eq_ignore_ascii_case("content") => Self::Content,
            Some(t) if t.eq_ignore_ascii_case("writer") => Self::Writer,
            _ => Self::All,
        }
    }

    fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Title => &["title"],
            Self::Content => &["content"],
            Self::Writer => &["writer"],
            Self::All => &["title", "content", "writer"],
        }
    }
}

/// Filter of the post list, shared by the count and the row query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSearch {
    pattern: Option<String>,
    search_type: SearchType,
}

impl PostSearch {
    pub fn new(params: &SearchParams) -> Self {
        Self {
            pattern: params
                .keyword()
                .map(str::trim)
                .filter(|keyword| !keyword.is_empty())
                .map(|keyword| format!("%{}%", escape_like(keyword))),
            search_type: SearchType::parse(params.search_type()),
        }
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn where_clause(&self) -> String {
        match self.pattern {
            None => "WHERE delete_yn = false".to_string(),
            Some(_) => format!(
                "WHERE delete_yn = false AND ({})",
                self.search_type
                    .columns()
                    .iter()
                    .map(|column| format!("{column} ILIKE $1"))
                    .collect::<Vec<_>>()
                    .join(" OR ")
            ),
        }
    }

    /// Index of the first placeholder free for the caller after the filter's own.
    pub fn next_placeholder(&self) -> usize {
        match self.pattern {
            None => 1,
            Some(_) => 2,
        }
    }

    pub fn args(&self) -> Vec<&(dyn ToSql + Sync)> {
        match &self.pattern {
            None => vec![],
            Some(pattern) => vec![pattern as &(dyn ToSql + Sync)],
        }
    }

    pub fn count_query(&self) -> String {
        format!("SELECT COUNT(*) AS count FROM tb_post {}", self.where_clause())
    }

    pub fn list_query(&self) -> String {
        let offset = self.next_placeholder();
        format!(
            "SELECT {POST_COLUMNS} FROM tb_post {} ORDER BY notice_yn DESC, id DESC OFFSET ${} LIMIT ${}",
            self.where_clause(),
            offset,
            offset + 1
        )
    }
}

fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
