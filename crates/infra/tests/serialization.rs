use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use bizdoc_admin::{Contact, User};
use bizdoc_core::{Document, FieldKind, FieldValue, Geometry, Shared};
use bizdoc_customers::{Account, ContactDetail, Interaction, InteractionType, Method};
use bizdoc_events::InMemoryChangeTracker;
use bizdoc_infra::{ModuleRegistry, from_json, serialized_field_names, to_json};
use bizdoc_products::{ProductInfo, ProductPriceList};
use bizdoc_sales::{Opportunity, PricingType};
use bizdoc_staff::{SocialTitle, StaffList};

fn registry() -> ModuleRegistry {
    ModuleRegistry::with_standard_documents(Arc::new(InMemoryChangeTracker::new()))
}

/// The JSON keys of a fresh document are exactly its serialized fields.
fn assert_partition<T>()
where
    T: Document + Serialize + DeserializeOwned + core::fmt::Debug,
{
    let document = bizdoc_core::new_instance::<T>(&registry()).unwrap();
    let json = serde_json::to_value(&document).unwrap();
    let keys: BTreeSet<&str> = json
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    let mut expected: BTreeSet<&str> = serialized_field_names::<T>().into_iter().collect();
    expected.insert("bizId");
    assert_eq!(keys, expected, "{}", T::key());

    for descriptor in T::fields().iter().filter(|d| !d.serialized) {
        assert!(!keys.contains(descriptor.name), "{} leaked", descriptor.name);
    }

    let back: T = serde_json::from_value(json).unwrap();
    assert_eq!(back.biz_id(), document.biz_id());
}

/// Give every serialized scalar field of `document` a sample value.
///
/// Enumerations, references and collections are left to the caller.
fn fill_scalars<T: Document>(document: &mut T) {
    let moment = NaiveDate::from_ymd_opt(2024, 2, 29)
        .and_then(|d| d.and_hms_milli_opt(13, 45, 30, 250))
        .unwrap();
    for descriptor in T::fields().iter().filter(|d| d.serialized) {
        let value = match descriptor.kind {
            FieldKind::Text => FieldValue::from(format!("{} sample", descriptor.name)),
            FieldKind::Integer => FieldValue::Integer(-42),
            FieldKind::Long => FieldValue::Long(9_000_000_000),
            FieldKind::Date => FieldValue::Date(moment.date()),
            FieldKind::DateTime => FieldValue::DateTime(moment),
            FieldKind::Geometry => FieldValue::from("POINT Z (151.2 -33.9 10)"),
            _ => continue,
        };
        document.set(descriptor.name, value).unwrap();
    }
}

/// Every serialized field reads back unchanged, and no field is left unset.
fn assert_fields_survive<T>(original: &T)
where
    T: Document + Serialize + DeserializeOwned,
{
    let back: T = from_json(&to_json(original).unwrap()).unwrap();
    assert_eq!(back.biz_id(), original.biz_id());
    for name in serialized_field_names::<T>() {
        let value = original.get(name).unwrap();
        assert_ne!(value, FieldValue::Null, "{}.{name} was not populated", T::key());
        assert_eq!(back.get(name).unwrap(), value, "{}.{name}", T::key());
    }
}

#[test]
fn every_document_partitions_its_fields() {
    assert_partition::<Contact>();
    assert_partition::<User>();
    assert_partition::<Account>();
    assert_partition::<ContactDetail>();
    assert_partition::<Interaction>();
    assert_partition::<ProductInfo>();
    assert_partition::<ProductPriceList>();
    assert_partition::<Opportunity>();
    assert_partition::<StaffList>();
}

#[test]
fn contact_detail_round_trips_with_interactions() {
    let registry = registry();
    let mut contact = ContactDetail::new_instance(&registry).unwrap();
    contact.set_first_name(Some("Ada".into()));
    contact.set_last_name(Some("Lovelace".into()));
    contact.set_method(Some(Method::BusinessNumber));
    contact.set_interaction_type(Some(InteractionType::Upload));
    contact.set_selected_tab(Some(3));

    let mut interaction = Interaction::new_instance(&registry).unwrap();
    interaction.set_title(Some("Notes on the engine".into()));
    interaction.set_interaction_template(Some("Sent {document}".into()));
    let mut user = User::new_instance(&registry).unwrap();
    user.set_user_name(Some("ada".into()));
    interaction.set_user(Some(Shared::new(user)));
    contact.add_interaction(interaction);

    let json = to_json(&contact).unwrap();
    assert!(!json.contains("selectedTab"));

    let back: ContactDetail = from_json(&json).unwrap();
    assert_eq!(back, contact);
    assert_eq!(back.biz_key(), "Ada Lovelace");
    assert_eq!(back.method(), Some(Method::BusinessNumber));
    assert!(back.is_upload_selected());
    assert_eq!(back.selected_tab(), None);

    let read = &back.interactions().as_slice()[0];
    assert_eq!(read, &contact.interactions().as_slice()[0]);
    assert_eq!(read.interaction_template(), Some("Sent {document}"));
    assert_eq!(
        read.user().and_then(|u| u.borrow().user_name().map(str::to_owned)),
        Some("ada".to_string())
    );
}

#[test]
fn opportunity_round_trips_with_references() {
    let registry = registry();
    let mut opportunity = Opportunity::new_instance(&registry).unwrap();
    let mut account = Account::new_instance(&registry).unwrap();
    account.set_account_name(Some("Admiralty".into()));
    let mut price_list = ProductPriceList::new_instance(&registry).unwrap();
    price_list.set_retail_price(Some(12_000));

    opportunity.set_topic(Some("Tide tables".into()));
    opportunity.set_account(Some(Shared::new(account)));
    opportunity.set_price_list(Some(Shared::new(price_list)));
    opportunity.set_pricing_type(Some(PricingType::Retail));
    opportunity.set_quantity(Some(3));
    opportunity.set_tax(Some(10));

    let back: Opportunity = from_json(&to_json(&opportunity).unwrap()).unwrap();
    assert_eq!(back, opportunity);
    assert_eq!(back.quantity(), Some(3));
    assert_eq!(back.tax(), Some(10));
    assert!(back.is_price_list_selected());
    assert!(back.is_not_product_selected());
    assert_eq!(
        back.price_list().and_then(|p| p.borrow().retail_price()),
        Some(12_000)
    );
    assert_eq!(
        back.account().map(|a| a.borrow().biz_key()),
        Some("Admiralty".to_string())
    );
}

#[test]
fn staff_list_round_trips_dates_and_location() {
    let registry = registry();
    let mut staff = StaffList::new_instance(&registry).unwrap();
    staff.set_social_title(Some(SocialTitle::Ms));
    staff.set_date_of_birth(NaiveDate::from_ymd_opt(1906, 12, 9));
    staff.set_staff_location(Some(Geometry::from_wkt("POINT (-77.03 38.89)").unwrap()));

    let mut contact = Contact::new_instance(&registry).unwrap();
    contact.set_name(Some("Grace Hopper".into()));
    let mut user = User::new_instance(&registry).unwrap();
    user.set_contact(Some(Shared::new(contact)));
    staff.set_user(Some(Shared::new(user)));

    let back: StaffList = from_json(&to_json(&staff).unwrap()).unwrap();
    assert_eq!(back.biz_key(), "Grace Hopper");
    assert_eq!(back.date_of_birth(), staff.date_of_birth());
    assert_eq!(back.staff_location(), staff.staff_location());
    assert_eq!(back.social_title(), Some(SocialTitle::Ms));
}

#[test]
fn every_serialized_field_survives_a_round_trip() {
    let registry = registry();

    let mut contact = Contact::new_instance(&registry).unwrap();
    fill_scalars(&mut contact);
    assert_fields_survive(&contact);

    let mut user = User::new_instance(&registry).unwrap();
    fill_scalars(&mut user);
    user.set_contact(Some(Shared::new(contact)));
    assert_fields_survive(&user);
    let user = Shared::new(user);

    let mut account = Account::new_instance(&registry).unwrap();
    fill_scalars(&mut account);
    account.set_interaction_type(Some(InteractionType::SocialMedia));
    assert_fields_survive(&account);

    let mut interaction = Interaction::new_instance(&registry).unwrap();
    fill_scalars(&mut interaction);
    interaction.set_interaction_type(Some(InteractionType::Meeting));
    interaction.set_user(Some(user.clone()));
    assert_fields_survive(&interaction);

    let mut detail = ContactDetail::new_instance(&registry).unwrap();
    fill_scalars(&mut detail);
    detail.set_method(Some(Method::MobileNumber));
    detail.set_interaction_type(Some(InteractionType::Upload));
    detail.add_interaction(interaction);
    assert_fields_survive(&detail);

    let mut product = ProductInfo::new_instance(&registry).unwrap();
    fill_scalars(&mut product);
    assert_fields_survive(&product);

    let mut price_list = ProductPriceList::new_instance(&registry).unwrap();
    fill_scalars(&mut price_list);
    assert_fields_survive(&price_list);

    let mut opportunity = Opportunity::new_instance(&registry).unwrap();
    fill_scalars(&mut opportunity);
    opportunity.set_pricing_type(Some(PricingType::Bulk));
    opportunity.set_contact(Some(Shared::new(detail)));
    opportunity.set_account(Some(Shared::new(account)));
    opportunity.set_product(Some(Shared::new(product)));
    opportunity.set_price_list(Some(Shared::new(price_list)));
    assert_fields_survive(&opportunity);

    let mut staff = StaffList::new_instance(&registry).unwrap();
    fill_scalars(&mut staff);
    staff.set_social_title(Some(SocialTitle::Dr));
    staff.set_user(Some(user));
    assert_fields_survive(&staff);
}
