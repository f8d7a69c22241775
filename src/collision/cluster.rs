//! Angular clustering of contact hits.

use super::ContactHit;

/// Split angle-ordered hits into runs whose neighbouring angles differ by at
/// most `deviance`. The final hit always joins the last open run.
pub fn cluster_hits(hits: &[ContactHit], deviance: f32) -> Vec<Vec<ContactHit>> {
    let mut clusters: Vec<Vec<ContactHit>> = Vec::new();
    let mut open: Vec<ContactHit> = Vec::new();

    for hit in hits {
        let breaks = open
            .last()
            .is_some_and(|prev| (hit.angle - prev.angle).abs() > deviance);
        if breaks {
            clusters.push(std::mem::take(&mut open));
        }
        open.push(*hit);
    }
    if !open.is_empty() {
        clusters.push(open);
    }
    clusters
}

/// Closest hit of a cluster; the earliest wins ties.
pub fn closest(cluster: &[ContactHit]) -> Option<ContactHit> {
    cluster.iter().copied().fold(None, |best, hit| match best {
        Some(b) if b.distance <= hit.distance => Some(b),
        _ => Some(hit),
    })
}

/// One representative hit per cluster, in angle order.
pub fn reduce(hits: &[ContactHit], deviance: f32) -> Vec<ContactHit> {
    cluster_hits(hits, deviance)
        .iter()
        .filter_map(|cluster| closest(cluster))
        .collect()
}
