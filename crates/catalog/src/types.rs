//! Core domain types for the course catalog.
//!
//! The catalog is a static, read-only table of courses with cluster
//! assignments precomputed offline. It is loaded once at process start and
//! shared by reference for the lifetime of the process; every derived value
//! (similarity, predicted level) lives in per-request records, never here.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a topical cluster, assigned to each course offline.
pub type ClusterId = usize;

/// Default credit value for courses whose `minimum_credits` is absent.
pub const DEFAULT_MINIMUM_CREDITS: f32 = 1.0;

/// A single course as loaded from the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course key, e.g. "BIO101"
    pub key: String,
    pub title: String,
    /// Course description; may be empty
    pub description: String,
    /// Minimum credit hours; `None` when the source field was empty
    pub minimum_credits: Option<f32>,
    /// Cluster id assigned by the offline clustering run
    pub cluster: ClusterId,
}

impl Course {
    /// Minimum credits with the documented default applied (1.0).
    pub fn minimum_credits_or_default(&self) -> f32 {
        self.minimum_credits.unwrap_or(DEFAULT_MINIMUM_CREDITS)
    }
}

/// Workload category of a course.
///
/// Doubles as the user's preferred workload (extracted upstream) and as the
/// per-course predicted label. No other values exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditLevel {
    Low,
    Standard,
    High,
}

impl CreditLevel {
    /// All levels in display order.
    pub const ALL: [CreditLevel; 3] = [CreditLevel::Low, CreditLevel::Standard, CreditLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditLevel::Low => "Low",
            CreditLevel::Standard => "Standard",
            CreditLevel::High => "High",
        }
    }
}

impl fmt::Display for CreditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditLevel {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Low" => Ok(CreditLevel::Low),
            "Standard" => Ok(CreditLevel::Standard),
            "High" => Ok(CreditLevel::High),
            other => Err(CatalogError::InvalidValue {
                field: "credit level".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// The in-memory course catalog.
///
/// Holds every course in file order (ranking ties are broken by this order)
/// plus two lookup indices. Immutable after construction; methods return
/// references into the owned data.
#[derive(Debug)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    by_key: HashMap<String, usize>,
    cluster_index: HashMap<ClusterId, Vec<usize>>,
}

impl CourseCatalog {
    /// Build a catalog from parsed courses, rejecting duplicate keys.
    pub fn from_courses(courses: Vec<Course>) -> Result<Self> {
        let mut by_key = HashMap::with_capacity(courses.len());
        let mut cluster_index: HashMap<ClusterId, Vec<usize>> = HashMap::new();

        for (idx, course) in courses.iter().enumerate() {
            if by_key.insert(course.key.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateKey {
                    key: course.key.clone(),
                });
            }
            cluster_index.entry(course.cluster).or_default().push(idx);
        }

        Ok(Self {
            courses,
            by_key,
            cluster_index,
        })
    }

    /// Get a course by key.
    pub fn get(&self, key: &str) -> Option<&Course> {
        self.by_key.get(key).map(|&idx| &self.courses[idx])
    }

    /// All courses whose stored cluster equals `cluster`, in catalog order.
    ///
    /// May legally be empty; downstream stages handle the empty subset.
    pub fn in_cluster(&self, cluster: ClusterId) -> Vec<&Course> {
        self.cluster_index
            .get(&cluster)
            .map(|indices| indices.iter().map(|&idx| &self.courses[idx]).collect())
            .unwrap_or_default()
    }

    /// Iterate over all courses in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Cluster ids present in the catalog, with course counts.
    pub fn cluster_sizes(&self) -> HashMap<ClusterId, usize> {
        self.cluster_index
            .iter()
            .map(|(&cluster, indices)| (cluster, indices.len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
