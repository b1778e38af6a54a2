//! Domain Services
//!
//! Pure logic over article collections.

use chrono::NaiveDate;

use crate::domain::entities::Article;
use crate::domain::value_objects::Category;

/// Dashboard summary of the article collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleStats {
    pub total: usize,
    /// Categories that have at least one article, in first-seen order
    pub category_counts: Vec<(Category, usize)>,
    /// Highest count; ties go to the category seen first
    pub most_populated: Option<Category>,
    /// Date of the newest article
    pub last_updated: Option<NaiveDate>,
}

impl ArticleStats {
    /// `articles` must be newest-first, as `ArticleRepository::list` returns them
    pub fn from_newest_first(articles: &[Article]) -> Self {
        let mut category_counts: Vec<(Category, usize)> = Vec::new();
        for article in articles {
            match category_counts.iter_mut().find(|(c, _)| *c == article.category) {
                Some((_, count)) => *count += 1,
                None => category_counts.push((article.category, 1)),
            }
        }

        let mut most_populated: Option<(Category, usize)> = None;
        for &(category, count) in &category_counts {
            if most_populated.is_none_or(|(_, max)| count > max) {
                most_populated = Some((category, count));
            }
        }

        Self {
            total: articles.len(),
            category_counts,
            most_populated: most_populated.map(|(c, _)| c),
            last_updated: articles.first().map(Article::date),
        }
    }
}
