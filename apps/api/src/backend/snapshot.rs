//! Assembles a `KnowledgeSnapshot` from the five knowledge endpoints.

use tracing::{info, warn};

use crate::backend::{BackendClient, BackendError};
use crate::models::knowledge::KnowledgeSnapshot;

/// Fetches every knowledge source concurrently.
///
/// A failing source is logged and left empty; the rest of the snapshot is still
/// usable, and the responder has generic replies for empty sections.
pub async fn load_snapshot(backend: &BackendClient) -> KnowledgeSnapshot {
    let (profile, skill_groups, experience, education, projects) = tokio::join!(
        backend.get_profile(),
        backend.get_skill_groups(),
        backend.get_experience(),
        backend.get_education(),
        backend.get_projects(),
    );

    let snapshot = KnowledgeSnapshot::from_parts(
        or_empty("profile", profile),
        or_empty("skills", skill_groups),
        or_empty("experience", experience),
        or_empty("education", education),
        or_empty("projects", projects),
    );

    info!(
        skill_groups = snapshot.skill_groups.len(),
        experience = snapshot.experience.len(),
        education = snapshot.education.len(),
        projects = snapshot.projects.len(),
        "Knowledge snapshot loaded"
    );
    snapshot
}

fn or_empty<T: Default>(source: &str, result: Result<T, BackendError>) -> T {
    result.unwrap_or_else(|e| {
        warn!(source, "Knowledge fetch failed, using empty {source}: {e}");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_load_snapshot_combines_all_sources() {
        let server = MockServer::start().await;
        mount_json(&server, "/api/profile", json!({"name": "Chandru", "email": "c@example.com"})).await;
        mount_json(&server, "/api/skills", json!([{"category": "Backend", "items": ["Rust"]}])).await;
        mount_json(&server, "/api/experience", json!([{"role": "Engineer", "company": "Acme"}])).await;
        mount_json(&server, "/api/education", json!([{"degree": "B.E.", "institution": "PSG"}])).await;
        mount_json(&server, "/api/portfolio", json!([{"title": "UptimeEye"}])).await;

        let backend = BackendClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let snapshot = load_snapshot(&backend).await;

        assert_eq!(snapshot.name, "Chandru");
        assert_eq!(snapshot.email, "c@example.com");
        assert_eq!(snapshot.skill_groups[0].items, vec!["Rust"]);
        assert_eq!(snapshot.experience[0].company, "Acme");
        assert_eq!(snapshot.education[0].institution, "PSG");
        assert_eq!(snapshot.projects[0].title, "UptimeEye");
    }

    #[tokio::test]
    async fn test_failed_source_degrades_to_empty() {
        let server = MockServer::start().await;
        mount_json(&server, "/api/profile", json!({"name": "Chandru"})).await;
        Mock::given(method("GET"))
            .and(path("/api/skills"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_json(&server, "/api/experience", json!([])).await;
        mount_json(&server, "/api/education", json!([])).await;
        mount_json(&server, "/api/portfolio", json!([{"title": "UptimeEye"}])).await;

        let backend = BackendClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let snapshot = load_snapshot(&backend).await;

        assert_eq!(snapshot.name, "Chandru");
        assert!(snapshot.skill_groups.is_empty());
        assert_eq!(snapshot.projects.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_backend_yields_empty_snapshot() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let backend = BackendClient::new(uri, Duration::from_secs(2)).unwrap();
        assert_eq!(load_snapshot(&backend).await, KnowledgeSnapshot::default());
    }
}
