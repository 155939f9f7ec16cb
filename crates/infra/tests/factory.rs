use std::sync::Arc;

use bizdoc_core::{Document, DocumentFactory, DocumentKey, FieldValue};
use bizdoc_customers::{ContactDetail, Interaction};
use bizdoc_events::InMemoryChangeTracker;
use bizdoc_infra::ModuleRegistry;
use bizdoc_sales::Opportunity;
use bizdoc_staff::{SocialTitle, StaffList};

fn registry() -> (Arc<InMemoryChangeTracker>, ModuleRegistry) {
    let tracker = Arc::new(InMemoryChangeTracker::new());
    let registry = ModuleRegistry::with_standard_documents(tracker.clone());
    (tracker, registry)
}

#[test]
fn created_documents_are_empty_and_distinct() {
    let (tracker, registry) = registry();
    let a = ContactDetail::new_instance(&registry).unwrap();
    let b = ContactDetail::new_instance(&registry).unwrap();

    assert_ne!(a, b);
    assert_eq!(a.first_name(), None);
    assert!(a.interactions().is_empty());
    assert!(tracker.is_empty());
}

#[test]
fn created_documents_report_to_the_registry_tracker() {
    let (tracker, registry) = registry();
    let mut opportunity = Opportunity::new_instance(&registry).unwrap();
    opportunity.set_topic(Some("Analytical engine".into()));

    assert!(tracker.is_dirty(opportunity.biz_id()));
    let change = tracker.changes().remove(0);
    assert_eq!(change.document, Opportunity::key());
    assert_eq!(change.value, FieldValue::Text("Analytical engine".into()));
}

#[test]
fn factory_defaults_are_applied() {
    let (_, registry) = registry();
    let staff = StaffList::new_instance(&registry).unwrap();
    assert_eq!(staff.social_title(), Some(SocialTitle::Mr));
}

#[test]
fn unknown_keys_fail_with_a_creation_error() {
    let (_, registry) = registry();
    let key = DocumentKey::of("customers", "Lead");
    assert!(!registry.is_registered(&key));

    let err = registry.new_instance(&key).unwrap_err();
    assert_eq!(err.document(), &key);
    assert_eq!(err.to_string(), "cannot create a new instance of customers.Lead");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn empty_registry_knows_nothing() {
    let registry = ModuleRegistry::new(Arc::new(InMemoryChangeTracker::new()));
    assert!(Interaction::new_instance(&registry).is_err());
    assert!(registry.keys().is_empty());
}
