//! Streaming availability with a fixed fallback.
//!
//! Lookup failures never reach the caller: every failure, and an answer
//! with no services, is replaced by [`fallback_services`] and counted in
//! `ott_fallback_total{reason}`. Only an unknown movie is an error.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::ott::fallback_services;
use crate::domain::{DomainError, DomainResult, OttAvailability, RepositoryProvider};
use crate::infrastructure::enrichment::AvailabilityLookup;

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
    lookup: Arc<dyn AvailabilityLookup>,
}

fn record_fallback(reason: &'static str) {
    metrics::counter!("ott_fallback_total", "reason" => reason).increment(1);
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, lookup: Arc<dyn AvailabilityLookup>) -> Self {
        Self { repos, lookup }
    }

    pub async fn get_availability(&self, movie_id: &str) -> DomainResult<OttAvailability> {
        let movie = self
            .repos
            .movies()
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Movie", "id", movie_id))?;

        let services = match self.lookup.lookup(&movie.title, movie.year).await {
            Ok(services) if !services.is_empty() => services,
            Ok(_) => {
                debug!(movie_id, "Lookup found no services, using fallback");
                record_fallback("empty");
                fallback_services()
            }
            Err(e) => {
                warn!(movie_id, error = %e, "Availability lookup failed, using fallback");
                record_fallback(e.reason());
                fallback_services()
            }
        };

        Ok(OttAvailability {
            movie_id: movie.id,
            movie_title: movie.title,
            year: movie.year,
            services,
            last_updated: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OttService, OttServiceType};
    use crate::infrastructure::database::repositories::movie_repository::tests::new_movie;
    use crate::infrastructure::database::test_repositories;
    use crate::infrastructure::enrichment::{EnrichmentError, PerplexityClient, PerplexityConfig};
    use async_trait::async_trait;
    use mockito::Server;

    struct Fixed(Vec<OttService>);

    #[async_trait]
    impl AvailabilityLookup for Fixed {
        async fn lookup(&self, _: &str, _: i32) -> Result<Vec<OttService>, EnrichmentError> {
            Ok(self.0.clone())
        }
    }

    async fn movie_id(repos: &Arc<dyn RepositoryProvider>) -> String {
        repos
            .movies()
            .insert(new_movie("Top Gun: Maverick", 2022, 8.3, &["Action"]))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn lookup_answer_is_used() {
        let repos = test_repositories().await;
        let id = movie_id(&repos).await;
        let answer = vec![OttService {
            name: "Paramount+".into(),
            service_type: OttServiceType::Stream,
            price: None,
            quality: None,
            regions: vec!["US".into()],
            url: None,
        }];
        let service = AvailabilityService::new(repos, Arc::new(Fixed(answer.clone())));
        let availability = service.get_availability(&id).await.unwrap();
        assert_eq!(availability.services, answer);
        assert_eq!(availability.movie_title, "Top Gun: Maverick");
    }

    #[tokio::test]
    async fn empty_answer_falls_back() {
        let repos = test_repositories().await;
        let id = movie_id(&repos).await;
        let service = AvailabilityService::new(repos, Arc::new(Fixed(vec![])));
        assert_eq!(service.get_availability(&id).await.unwrap().services, fallback_services());
    }

    #[tokio::test]
    async fn upstream_500_falls_back() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;
        let client = PerplexityClient::new(PerplexityConfig {
            api_key: Some("k".into()),
            base_url: server.url(),
            ..Default::default()
        })
        .unwrap();

        let repos = test_repositories().await;
        let id = movie_id(&repos).await;
        let service = AvailabilityService::new(repos, Arc::new(client));
        assert_eq!(service.get_availability(&id).await.unwrap().services, fallback_services());
    }

    #[tokio::test]
    async fn missing_credential_falls_back_without_calling_upstream() {
        let mut server = Server::new_async().await;
        let upstream = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;
        let client = PerplexityClient::new(PerplexityConfig {
            api_key: None,
            base_url: server.url(),
            ..Default::default()
        })
        .unwrap();

        let repos = test_repositories().await;
        let id = movie_id(&repos).await;
        let service = AvailabilityService::new(repos, Arc::new(client));
        for _ in 0..2 {
            let availability = service.get_availability(&id).await.unwrap();
            assert_eq!(availability.services, fallback_services());
        }
        upstream.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_movie_is_not_found() {
        let repos = test_repositories().await;
        let service = AvailabilityService::new(repos, Arc::new(Fixed(vec![])));
        assert!(service.get_availability("missing").await.unwrap_err().is_not_found());
    }
}
