//! Listing store: the service catalog and its reviews.
//!
//! `rating` and `review_count` on a listing are derived values. They start
//! at zero and are recomputed from the listing's review list every time a
//! review is added; deleting a listing cascades to its reviews.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, warn};

use hustlr_shared::helpers::{average_rating, ListingFilter, ListingSort};
use hustlr_shared::{PriceType, ReviewId, ServiceCategory, ServiceId, UserId};

use crate::error::{Result, StoreError};
use crate::models::{Review, Service, ServiceLocation};
use crate::notify::{Notice, NoticeQueue};

/// Payload for creating a listing. Rating fields are not accepted: they
/// always start at zero.
#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_type: PriceType,
    pub image_url: String,
    pub provider_id: UserId,
    pub category: ServiceCategory,
    pub location: ServiceLocation,
}

/// Partial listing update. Derived fields and the owner are not writable.
#[derive(Debug, Clone, Default)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_type: Option<PriceType>,
    pub image_url: Option<String>,
    pub category: Option<ServiceCategory>,
    pub location: Option<ServiceLocation>,
}

/// Payload for posting a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

/// Catalog arena plus per-listing review lists.
#[derive(Default)]
pub struct ListingStore {
    services: HashMap<ServiceId, Service>,
    reviews: HashMap<ServiceId, Vec<Review>>,
    notices: NoticeQueue,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.get(&id)
    }

    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Create a listing with a fresh id and zeroed rating fields.
    pub fn add_service(&mut self, data: NewService) -> Result<Service> {
        if data.name.trim().is_empty() {
            self.notices.push(Notice::error("Service name is required"));
            return Err(StoreError::Validation("service name is required".to_string()));
        }
        if data.price <= 0.0 {
            self.notices.push(Notice::error("Price must be greater than zero"));
            return Err(StoreError::Validation("price must be positive".to_string()));
        }

        let service = Service {
            id: ServiceId::new(),
            name: data.name,
            description: data.description,
            price: data.price,
            price_type: data.price_type,
            image_url: data.image_url,
            rating: 0.0,
            review_count: 0,
            provider_id: data.provider_id,
            category: data.category,
            location: data.location,
        };

        info!(service = %service.id, provider = %service.provider_id, "Service added");
        self.services.insert(service.id, service.clone());
        self.notices.push(Notice::success("Service added successfully"));
        Ok(service)
    }

    /// Merge a partial update into the matching listing.
    pub fn update_service(&mut self, id: ServiceId, updates: ServiceUpdate) -> Result<Service> {
        if let Some(price) = updates.price {
            if price <= 0.0 {
                self.notices.push(Notice::error("Price must be greater than zero"));
                return Err(StoreError::Validation("price must be positive".to_string()));
            }
        }

        let Some(service) = self.services.get_mut(&id) else {
            warn!(service = %id, "Update failed: service not found");
            return Err(StoreError::ServiceNotFound);
        };

        if let Some(name) = updates.name {
            service.name = name;
        }
        if let Some(description) = updates.description {
            service.description = description;
        }
        if let Some(price) = updates.price {
            service.price = price;
        }
        if let Some(price_type) = updates.price_type {
            service.price_type = price_type;
        }
        if let Some(image_url) = updates.image_url {
            service.image_url = image_url;
        }
        if let Some(category) = updates.category {
            service.category = category;
        }
        if let Some(location) = updates.location {
            service.location = location;
        }

        let updated = service.clone();
        info!(service = %id, "Service updated");
        self.notices.push(Notice::success("Service updated successfully"));
        Ok(updated)
    }

    /// Remove a listing and every review keyed by it.
    pub fn delete_service(&mut self, id: ServiceId) -> Result<()> {
        if self.services.remove(&id).is_none() {
            warn!(service = %id, "Delete failed: service not found");
            return Err(StoreError::ServiceNotFound);
        }

        self.reviews.remove(&id);
        info!(service = %id, "Service deleted");
        self.notices.push(Notice::success("Service deleted successfully"));
        Ok(())
    }

    pub fn get_services_by_provider(&self, provider_id: UserId) -> Vec<&Service> {
        self.services
            .values()
            .filter(|service| service.provider_id == provider_id)
            .collect()
    }

    /// Append a review and recompute the listing's derived rating fields.
    pub fn add_review(&mut self, data: NewReview) -> Result<Review> {
        if !(1..=5).contains(&data.rating) {
            self.notices.push(Notice::error("Rating must be between 1 and 5"));
            return Err(StoreError::Validation(format!(
                "rating must be 1-5, got {}",
                data.rating
            )));
        }
        if !self.services.contains_key(&data.service_id) {
            warn!(service = %data.service_id, "Review rejected: service not found");
            return Err(StoreError::ServiceNotFound);
        }

        let review = Review {
            id: ReviewId::new(),
            service_id: data.service_id,
            user_id: data.user_id,
            user_name: data.user_name,
            rating: data.rating,
            comment: data.comment,
            date: Utc::now().date_naive(),
        };

        self.reviews
            .entry(data.service_id)
            .or_default()
            .push(review.clone());
        self.recompute_rating(data.service_id);

        info!(service = %data.service_id, rating = review.rating, "Review added");
        self.notices.push(Notice::success("Review submitted successfully"));
        Ok(review)
    }

    /// Review list for a listing, oldest first. Empty if the listing has
    /// no reviews or does not exist.
    pub fn get_service_reviews(&self, service_id: ServiceId) -> &[Review] {
        self.reviews
            .get(&service_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Filtered, sorted view of the catalog.
    pub fn search(&self, filter: &ListingFilter, sort: Option<ListingSort>) -> Vec<&Service> {
        let mut results: Vec<&Service> = self
            .services
            .values()
            .filter(|service| matches_filter(service, filter))
            .collect();

        if let Some(sort) = sort {
            results.sort_by(|a, b| match sort {
                ListingSort::PriceAsc => a.price.total_cmp(&b.price),
                ListingSort::PriceDesc => b.price.total_cmp(&a.price),
                ListingSort::RatingDesc => b
                    .rating
                    .total_cmp(&a.rating)
                    .then(b.review_count.cmp(&a.review_count)),
                ListingSort::MostReviewed => b.review_count.cmp(&a.review_count),
            });
        }

        results
    }

    /// Remove and return pending toast notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Used by seeding to register a pre-built listing without toast noise.
    pub(crate) fn insert_seed_service(&mut self, service: Service) {
        self.services.insert(service.id, service);
    }

    /// Used by seeding to register pre-built reviews without touching
    /// today's date, then re-derive the listing's rating.
    pub(crate) fn insert_seed_review(&mut self, review: Review) {
        let service_id = review.service_id;
        self.reviews.entry(service_id).or_default().push(review);
        self.recompute_rating(service_id);
    }

    fn recompute_rating(&mut self, service_id: ServiceId) {
        let ratings: Vec<u8> = self
            .reviews
            .get(&service_id)
            .map(|reviews| reviews.iter().map(|r| r.rating).collect())
            .unwrap_or_default();

        if let Some(service) = self.services.get_mut(&service_id) {
            service.rating = average_rating(&ratings);
            service.review_count = ratings.len() as u32;
        }
    }
}

fn matches_filter(service: &Service, filter: &ListingFilter) -> bool {
    if let Some(category) = filter.category {
        if service.category != category {
            return false;
        }
    }
    if let Some(ref query) = filter.query {
        let needle = query.to_lowercase();
        if !service.name.to_lowercase().contains(&needle)
            && !service.description.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(ref city) = filter.city {
        if !service.location.city.eq_ignore_ascii_case(city) {
            return false;
        }
    }
    if let Some(min) = filter.min_price {
        if service.price < min {
            return false;
        }
    }
    if let Some(max) = filter.max_price {
        if service.price > max {
            return false;
        }
    }
    if let Some(min_rating) = filter.min_rating {
        if service.rating < min_rating {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sydney() -> ServiceLocation {
        ServiceLocation {
            city: "Sydney".to_string(),
            suburb: "Bondi".to_string(),
            postcode: 2026,
        }
    }

    fn new_service(name: &str, price: f64, provider_id: UserId) -> NewService {
        NewService {
            name: name.to_string(),
            description: format!("Professional {name} services"),
            price,
            price_type: PriceType::Hour,
            image_url: "/images/placeholders/service-placeholder.png".to_string(),
            provider_id,
            category: ServiceCategory::Painting,
            location: sydney(),
        }
    }

    fn review_for(service_id: ServiceId, rating: u8) -> NewReview {
        NewReview {
            service_id,
            user_id: UserId::new(),
            user_name: "Emma Smith".to_string(),
            rating,
            comment: "Great work, would definitely recommend!".to_string(),
        }
    }

    #[test]
    fn new_service_starts_unrated() {
        let mut store = ListingStore::new();
        let service = store.add_service(new_service("Paint", 50.0, UserId::new())).unwrap();
        assert_eq!(service.rating, 0.0);
        assert_eq!(service.review_count, 0);
    }

    #[test]
    fn add_service_validates_name_and_price() {
        let mut store = ListingStore::new();
        let provider = UserId::new();

        assert!(matches!(
            store.add_service(new_service("  ", 50.0, provider)),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.add_service(new_service("Paint", 0.0, provider)),
            Err(StoreError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn reviews_drive_rating_recomputation() {
        let mut store = ListingStore::new();
        let service = store.add_service(new_service("Paint", 50.0, UserId::new())).unwrap();

        for rating in [5, 4, 5] {
            store.add_review(review_for(service.id, rating)).unwrap();
        }

        let service = store.service(service.id).unwrap();
        assert_eq!(service.rating, 4.7);
        assert_eq!(service.review_count, 3);
        assert_eq!(store.get_service_reviews(service.id).len(), 3);
    }

    #[test]
    fn review_rating_must_be_in_range() {
        let mut store = ListingStore::new();
        let service = store.add_service(new_service("Paint", 50.0, UserId::new())).unwrap();

        assert!(matches!(
            store.add_review(review_for(service.id, 0)),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.add_review(review_for(service.id, 6)),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.service(service.id).unwrap().review_count, 0);
    }

    #[test]
    fn review_for_unknown_service_is_rejected() {
        let mut store = ListingStore::new();
        assert!(matches!(
            store.add_review(review_for(ServiceId::new(), 5)),
            Err(StoreError::ServiceNotFound)
        ));
    }

    #[test]
    fn delete_cascades_to_reviews() {
        let mut store = ListingStore::new();
        let provider = UserId::new();
        let service = store.add_service(new_service("Paint", 50.0, provider)).unwrap();
        store.add_review(review_for(service.id, 5)).unwrap();

        store.delete_service(service.id).unwrap();

        assert!(store.get_service_reviews(service.id).is_empty());
        assert!(store.get_services_by_provider(provider).is_empty());
        assert!(matches!(
            store.delete_service(service.id),
            Err(StoreError::ServiceNotFound)
        ));
    }

    #[test]
    fn update_merges_partial_fields() {
        let mut store = ListingStore::new();
        let service = store.add_service(new_service("Paint", 50.0, UserId::new())).unwrap();

        let updated = store
            .update_service(
                service.id,
                ServiceUpdate {
                    price: Some(75.0),
                    ..ServiceUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, 75.0);
        assert_eq!(updated.name, "Paint");

        assert!(matches!(
            store.update_service(ServiceId::new(), ServiceUpdate::default()),
            Err(StoreError::ServiceNotFound)
        ));
    }

    #[test]
    fn search_filters_and_sorts() {
        let mut store = ListingStore::new();
        let provider = UserId::new();
        let cheap = store.add_service(new_service("Budget Paint", 40.0, provider)).unwrap();
        let pricey = store.add_service(new_service("Premium Paint", 120.0, provider)).unwrap();

        let mut cleaning = new_service("Deep Cleaning", 80.0, provider);
        cleaning.category = ServiceCategory::Cleaning;
        store.add_service(cleaning).unwrap();

        let filter = ListingFilter {
            category: Some(ServiceCategory::Painting),
            ..ListingFilter::default()
        };
        let results = store.search(&filter, Some(ListingSort::PriceAsc));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, cheap.id);
        assert_eq!(results[1].id, pricey.id);

        let filter = ListingFilter {
            query: Some("premium".to_string()),
            ..ListingFilter::default()
        };
        let results = store.search(&filter, None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, pricey.id);

        let filter = ListingFilter {
            max_price: Some(90.0),
            ..ListingFilter::default()
        };
        assert_eq!(store.search(&filter, None).len(), 2);
    }
}
