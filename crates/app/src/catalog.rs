//! Catalog
//!
//! In-memory books and activities loaded from a YAML document. Implements
//! both repository ports; activities are only visible inside their
//! `starts_at..=ends_at` window, and an absent bound leaves that side open.
//! Book and activity ids may be written unquoted as integers.

use std::{fs, path::Path};

use async_trait::async_trait;
use bookshop::{
    activities::{
        Activity, ActivityId, ActivityKind, ConfigError, bundle::BundleActivity,
        tiered_flat::TieredFlatActivity, tiered_percentage::TieredPercentageActivity,
    },
    books::{Book, BookId},
};
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{RepositoryError, activities::ActivitiesRepository, books::BooksRepository};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The same book is listed twice
    #[error("book {0} is listed more than once")]
    DuplicateBook(BookId),

    /// The same activity is listed twice for one kind
    #[error("{kind} activity {id} is listed more than once")]
    DuplicateActivity {
        /// Activity kind
        kind: ActivityKind,
        /// Repeated identifier
        id: ActivityId,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    books: Vec<Book>,

    #[serde(default)]
    activities: ActivitiesDocument,
}

#[derive(Debug, Default, Deserialize)]
struct ActivitiesDocument {
    #[serde(default)]
    tiered_percentage: Vec<Scheduled<TieredPercentageActivity>>,

    #[serde(default)]
    tiered_flat: Vec<Scheduled<TieredFlatActivity>>,

    #[serde(default)]
    bundle: Vec<Scheduled<BundleActivity>>,
}

/// An activity configuration with its validity window.
#[derive(Debug, Clone, Deserialize)]
struct Scheduled<T> {
    #[serde(default)]
    starts_at: Option<Timestamp>,

    #[serde(default)]
    ends_at: Option<Timestamp>,

    #[serde(flatten)]
    activity: T,
}

impl<T> Scheduled<T> {
    fn is_active_at(&self, point_in_time: Timestamp) -> bool {
        self.starts_at.is_none_or(|start| start <= point_in_time)
            && self.ends_at.is_none_or(|end| point_in_time <= end)
    }
}

/// Books and activities held in memory.
#[derive(Debug, Default)]
pub struct Catalog {
    books: FxHashMap<BookId, Book>,
    tiered_percentage: FxHashMap<ActivityId, Scheduled<TieredPercentageActivity>>,
    tiered_flat: FxHashMap<ActivityId, Scheduled<TieredFlatActivity>>,
    bundle: FxHashMap<ActivityId, Scheduled<BundleActivity>>,
}

impl Catalog {
    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or lists a book
    /// or activity more than once.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, or lists a book or
    /// activity more than once.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_norway::from_str(contents)?;

        let mut books = FxHashMap::default();

        for book in document.books {
            if books.contains_key(&book.id) {
                return Err(CatalogError::DuplicateBook(book.id));
            }

            books.insert(book.id.clone(), book);
        }

        let ActivitiesDocument {
            tiered_percentage,
            tiered_flat,
            bundle,
        } = document.activities;

        Ok(Self {
            books,
            tiered_percentage: index(ActivityKind::TieredPercentage, tiered_percentage, |a| {
                &a.id
            })?,
            tiered_flat: index(ActivityKind::TieredFlatAmount, tiered_flat, |a| &a.id)?,
            bundle: index(ActivityKind::Bundle, bundle, |a| &a.id)?,
        })
    }

    /// Number of books in the catalog.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Every stored activity, regardless of its window.
    pub fn activities(&self) -> impl Iterator<Item = Activity> + '_ {
        let tiered_percentage = self
            .tiered_percentage
            .values()
            .map(|scheduled| Activity::from(scheduled.activity.clone()));

        let tiered_flat = self
            .tiered_flat
            .values()
            .map(|scheduled| Activity::from(scheduled.activity.clone()));

        let bundle = self
            .bundle
            .values()
            .map(|scheduled| Activity::from(scheduled.activity.clone()));

        tiered_percentage.chain(tiered_flat).chain(bundle)
    }

    /// Validate every stored activity, returning the malformed ones sorted
    /// by kind and identifier.
    pub fn malformed_activities(&self) -> Vec<(ActivityKind, ActivityId, ConfigError)> {
        let mut malformed: Vec<_> = self
            .activities()
            .filter_map(|activity| {
                activity
                    .validate()
                    .err()
                    .map(|error| (activity.kind(), activity.id().clone(), error))
            })
            .collect();

        malformed.sort_by(|(lhs_kind, lhs_id, _), (rhs_kind, rhs_id, _)| {
            lhs_kind
                .code()
                .cmp(&rhs_kind.code())
                .then_with(|| lhs_id.cmp(rhs_id))
        });

        malformed
    }
}

fn index<T>(
    kind: ActivityKind,
    activities: Vec<Scheduled<T>>,
    id: impl Fn(&T) -> &ActivityId,
) -> Result<FxHashMap<ActivityId, Scheduled<T>>, CatalogError> {
    let mut indexed = FxHashMap::default();

    for scheduled in activities {
        let activity_id = id(&scheduled.activity).clone();

        if indexed.contains_key(&activity_id) {
            return Err(CatalogError::DuplicateActivity {
                kind,
                id: activity_id,
            });
        }

        indexed.insert(activity_id, scheduled);
    }

    Ok(indexed)
}

fn active<T: Clone>(
    activities: &FxHashMap<ActivityId, Scheduled<T>>,
    activity: &ActivityId,
    point_in_time: Timestamp,
) -> Option<T> {
    activities
        .get(activity)
        .filter(|scheduled| scheduled.is_active_at(point_in_time))
        .map(|scheduled| scheduled.activity.clone())
}

#[async_trait]
impl BooksRepository for Catalog {
    async fn find_book(&self, book: &BookId) -> Result<Option<Book>, RepositoryError> {
        Ok(self.books.get(book).cloned())
    }
}

#[async_trait]
impl ActivitiesRepository for Catalog {
    async fn find_tiered_percentage(
        &self,
        activity: &ActivityId,
        point_in_time: Timestamp,
    ) -> Result<Option<TieredPercentageActivity>, RepositoryError> {
        Ok(active(&self.tiered_percentage, activity, point_in_time))
    }

    async fn find_tiered_flat(
        &self,
        activity: &ActivityId,
        point_in_time: Timestamp,
    ) -> Result<Option<TieredFlatActivity>, RepositoryError> {
        Ok(active(&self.tiered_flat, activity, point_in_time))
    }

    async fn find_bundle(
        &self,
        activity: &ActivityId,
        point_in_time: Timestamp,
    ) -> Result<Option<BundleActivity>, RepositoryError> {
        Ok(active(&self.bundle, activity, point_in_time))
    }
}
