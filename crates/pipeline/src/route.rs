//! Cluster routing: assign the user vector to one cluster and pull that
//! cluster's courses out of the catalog.

use catalog::{ClusterId, Course, CourseCatalog};
use models::{RouteCluster, SparseVector};
use std::sync::Arc;
use tracing::debug;

/// Routes a user vector to exactly one precomputed cluster and filters the
/// catalog down to that cluster's courses.
///
/// An empty subset is a legal outcome (the cluster may contain none of the
/// currently loaded courses) and propagates downstream unchanged; there is
/// no fallback reassignment.
#[derive(Clone)]
pub struct ClusterRouter {
    catalog: Arc<CourseCatalog>,
    model: Arc<dyn RouteCluster>,
}

impl ClusterRouter {
    pub fn new(catalog: Arc<CourseCatalog>, model: Arc<dyn RouteCluster>) -> Self {
        Self { catalog, model }
    }

    /// Pick the cluster for `vector` and return its courses in catalog
    /// order.
    pub fn route(&self, vector: &SparseVector) -> (ClusterId, Vec<Course>) {
        let cluster = self.model.route_cluster(vector);
        let subset: Vec<Course> = self
            .catalog
            .in_cluster(cluster)
            .into_iter()
            .cloned()
            .collect();

        debug!(
            "Routed user vector to cluster {} ({} candidate courses)",
            cluster,
            subset.len()
        );
        (cluster, subset)
    }
}
